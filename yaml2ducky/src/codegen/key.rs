use super::script::{KeyScripts, Script};
use duckypad_core::{KeyAction, KeyDef};

const MODIFIER_KEYS: &[&str] = &[
    "SHIFT", "LSHIFT", "RSHIFT", "CTRL", "CONTROL", "LCTRL", "RCTRL", "ALT", "LALT", "RALT",
    "OPTION", "ROPTION", "GUI", "WINDOWS", "WIN", "COMMAND", "LGUI", "RGUI", "RWINDOWS",
    "RCOMMAND",
];

const SPECIAL_KEYS: &[&str] = &[
    "ESC", "ESCAPE", "ENTER", "RETURN", "TAB", "SPACE", "BACKSPACE", "DELETE", "INSERT", "HOME",
    "END", "PAGEUP", "PAGEDOWN", "UP", "DOWN", "LEFT", "RIGHT", "UPARROW", "DOWNARROW",
    "LEFTARROW", "RIGHTARROW", "CAPSLOCK", "NUMLOCK", "SCROLLLOCK", "PRINTSCREEN", "PAUSE",
    "BREAK", "MENU", "APP", "POWER",
];

pub fn is_modifier_key(name: &str) -> bool {
    let upper = name.to_uppercase();
    MODIFIER_KEYS.contains(&upper.as_str())
}

/// Named keys duckyScript presses on their own line, including `F1`..`F24`
/// and the `MK_`/`KP_` media and keypad families.
pub fn is_special_key(name: &str) -> bool {
    let upper = name.to_uppercase();

    if SPECIAL_KEYS.contains(&upper.as_str()) {
        return true;
    }

    if upper.starts_with("MK_") || upper.starts_with("KP_") {
        return true;
    }

    upper
        .strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .map_or(false, |n| (1..=24).contains(&n))
}

/// Scripts for a key's own action. Switchers are handled separately.
pub fn action_scripts(def: &KeyDef) -> KeyScripts {
    let mut press = Script::new();

    match &def.action {
        KeyAction::None => {}
        KeyAction::Key {
            name,
            modifier: Some(modifier),
        } => press.push(format!("{} {}", modifier, name.to_lowercase())),
        KeyAction::Key {
            name,
            modifier: None,
        } => {
            if def.hold || name.chars().count() == 1 || is_modifier_key(name) {
                let key = if is_modifier_key(name) {
                    name.to_uppercase()
                } else {
                    name.clone()
                };
                let mut release = Script::new();
                press.key_down(&key);
                release.key_up(&key);
                return KeyScripts::with_release(press, release);
            } else if is_special_key(name) {
                press.push(name.to_uppercase());
            } else {
                press.push(format!("STRING {}", name));
            }
        }
        KeyAction::Text(text) => press.push(format!("STRING {}", text)),
        KeyAction::Media(command) => press.push(command.clone()),
        KeyAction::Script(lines) => {
            for line in lines {
                press.push(line.clone());
            }
        }
    }

    KeyScripts::press_only(press)
}
