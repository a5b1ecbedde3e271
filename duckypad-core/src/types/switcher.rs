//! Layer switcher declarations

use log::warn;

/// How a switcher key moves between its source and target layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchKind {
    /// Hold a modifier for as long as the target layer is active.
    ModifierHold { modifier: Option<String> },
    /// Press to enter, press the same slot again to leave.
    Toggle,
    /// Enter for a single key action, then return.
    Oneshot,
    /// Active only while the key is held.
    Momentary,
}

impl SwitchKind {
    /// Build a kind from the `layer_type` and `modifier` fields of a key.
    ///
    /// A missing or unrecognised `layer_type` falls back to `modifier_hold`.
    /// Only `modifier_hold` keeps the modifier.
    pub fn from_declaration(layer_type: Option<&str>, modifier: Option<&str>) -> Self {
        let modifier = modifier
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_uppercase);

        match layer_type.map(|t| t.trim().to_lowercase()).as_deref() {
            None | Some("modifier_hold") => SwitchKind::ModifierHold { modifier },
            Some("toggle") => SwitchKind::Toggle,
            Some("oneshot") => SwitchKind::Oneshot,
            Some("momentary") => SwitchKind::Momentary,
            Some(other) => {
                warn!("Unknown layer_type '{}', using modifier_hold", other);
                SwitchKind::ModifierHold { modifier }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SwitchKind::ModifierHold { .. } => "modifier_hold",
            SwitchKind::Toggle => "toggle",
            SwitchKind::Oneshot => "oneshot",
            SwitchKind::Momentary => "momentary",
        }
    }

    pub fn modifier(&self) -> Option<&str> {
        match self {
            SwitchKind::ModifierHold { modifier } => modifier.as_deref(),
            _ => None,
        }
    }
}

/// A key that switches to `target`, a layer id of the same profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switcher {
    pub target: String,
    pub kind: SwitchKind,
}
