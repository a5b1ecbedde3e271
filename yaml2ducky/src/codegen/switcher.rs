//! Script pairs for layer switcher keys.
//!
//! The declaring scope gets the source side; the target layer gets a
//! return slot at the same key id.

use super::script::{KeyScripts, Script};
use duckypad_core::SwitchKind;

/// Scripts for the key that declares the switcher.
pub fn source_scripts(kind: &SwitchKind, target: &str) -> KeyScripts {
    let mut press = Script::new();

    match kind {
        SwitchKind::ModifierHold {
            modifier: Some(modifier),
        } => {
            press.key_down(modifier);
            press.goto(target);

            let mut release = Script::new();
            release.key_up(modifier);
            KeyScripts::with_release(press, release)
        }
        SwitchKind::ModifierHold { modifier: None }
        | SwitchKind::Toggle
        | SwitchKind::Oneshot
        | SwitchKind::Momentary => {
            press.goto(target);
            KeyScripts::press_only(press)
        }
    }
}

/// Scripts for the return slot in the target layer. Oneshot layers have no
/// slot; their action keys return on their own.
pub fn return_scripts(kind: &SwitchKind, source: &str) -> Option<KeyScripts> {
    let mut press = Script::new();
    let mut release = Script::new();

    match kind {
        SwitchKind::ModifierHold { modifier } => {
            if let Some(modifier) = modifier {
                press.key_down(modifier);
                release.key_up(modifier);
            }
            release.goto(source);
            Some(KeyScripts::with_release(press, release))
        }
        SwitchKind::Toggle => {
            press.goto(source);
            Some(KeyScripts::press_only(press))
        }
        SwitchKind::Momentary => {
            release.goto(source);
            Some(KeyScripts::with_release(press, release))
        }
        SwitchKind::Oneshot => None,
    }
}

/// Scripts for a switcher declared inside its own target layer. It leaves
/// the layer the way that layer's return slot would; a oneshot switcher
/// jumps straight back on press.
pub fn exit_scripts(kind: &SwitchKind, source: &str) -> KeyScripts {
    return_scripts(kind, source).unwrap_or_else(|| {
        let mut press = Script::new();
        press.goto(source);
        KeyScripts::press_only(press)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctrl_hold() -> SwitchKind {
        SwitchKind::ModifierHold {
            modifier: Some("CTRL".to_string()),
        }
    }

    fn render(scripts: &KeyScripts) -> (String, Option<String>) {
        (
            scripts.press.render(),
            scripts.release.as_ref().map(Script::render),
        )
    }

    #[test]
    fn test_modifier_hold_pair() {
        assert_eq!(
            render(&source_scripts(&ctrl_hold(), "Foxhole-Ctrl")),
            (
                "DEFAULTDELAY 0\nKEYDOWN CTRL\nGOTO_PROFILE Foxhole-Ctrl\n".to_string(),
                Some("DEFAULTDELAY 0\nKEYUP CTRL\n".to_string())
            )
        );

        let slot = return_scripts(&ctrl_hold(), "Foxhole").unwrap();
        assert_eq!(
            render(&slot),
            (
                "DEFAULTDELAY 0\nKEYDOWN CTRL\n".to_string(),
                Some("DEFAULTDELAY 0\nKEYUP CTRL\nGOTO_PROFILE Foxhole\n".to_string())
            )
        );
    }

    #[test]
    fn test_modifier_hold_without_modifier() {
        let kind = SwitchKind::ModifierHold { modifier: None };
        let (press, release) = render(&source_scripts(&kind, "L"));
        assert_eq!(press, "DEFAULTDELAY 0\nGOTO_PROFILE L\n");
        assert_eq!(release, None);

        let (press, release) = render(&return_scripts(&kind, "P").unwrap());
        assert_eq!(press, "");
        assert_eq!(release.as_deref(), Some("DEFAULTDELAY 0\nGOTO_PROFILE P\n"));
    }

    #[test]
    fn test_toggle_and_momentary() {
        let (press, release) = render(&source_scripts(&SwitchKind::Toggle, "L"));
        assert_eq!(press, "DEFAULTDELAY 0\nGOTO_PROFILE L\n");
        assert_eq!(release, None);

        let (press, release) = render(&return_scripts(&SwitchKind::Toggle, "P").unwrap());
        assert_eq!(press, "DEFAULTDELAY 0\nGOTO_PROFILE P\n");
        assert_eq!(release, None);

        let (press, release) = render(&return_scripts(&SwitchKind::Momentary, "P").unwrap());
        assert_eq!(press, "");
        assert_eq!(release.as_deref(), Some("DEFAULTDELAY 0\nGOTO_PROFILE P\n"));
    }

    #[test]
    fn test_oneshot_has_no_slot() {
        assert_eq!(return_scripts(&SwitchKind::Oneshot, "P"), None);
        let (press, _) = render(&source_scripts(&SwitchKind::Oneshot, "L"));
        assert_eq!(press, "DEFAULTDELAY 0\nGOTO_PROFILE L\n");
    }
}
