//! Key identifiers and fully resolved key definitions

use super::color::Rgb;
use super::limits::TOTAL_KEYS;
use super::switcher::Switcher;
use std::collections::BTreeMap;
use std::fmt;

/// A key slot on the device, always within `1..=TOTAL_KEYS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(u8);

impl KeyId {
    /// Returns `None` when `id` is not an addressable key.
    pub fn new(id: i64) -> Option<Self> {
        if (1..=TOTAL_KEYS as i64).contains(&id) {
            Some(KeyId(id as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = KeyId> {
        (1..=TOTAL_KEYS).map(KeyId)
    }

    pub fn press_file_name(self) -> String {
        format!("key{}.txt", self.0)
    }

    pub fn release_file_name(self) -> String {
        format!("key{}-release.txt", self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved key map of one profile or layer. Ordered so every pass that
/// walks it is reproducible.
pub type KeyMap = BTreeMap<KeyId, KeyDef>;

/// What pressing a key does, independent of layer switching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyAction {
    /// No action of its own; the key may still carry a label or color.
    #[default]
    None,
    /// A named key, optionally combined with a modifier (`CTRL c`).
    Key {
        name: String,
        modifier: Option<String>,
    },
    /// Text typed with `STRING`.
    Text(String),
    /// A media command line such as `MK_VOLUP`.
    Media(String),
    /// Raw duckyScript lines.
    Script(Vec<String>),
}

impl KeyAction {
    pub fn is_none(&self) -> bool {
        matches!(self, KeyAction::None)
    }
}

/// Two display lines shown on the key's screen area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub top: Option<String>,
    pub bottom: Option<String>,
}

impl Label {
    pub fn new(top: impl Into<String>) -> Self {
        Self {
            top: Some(top.into()),
            bottom: None,
        }
    }

    pub fn two_line(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: Some(top.into()),
            bottom: Some(bottom.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.as_deref().map_or(true, str::is_empty)
            && self.bottom.as_deref().map_or(true, str::is_empty)
    }

    pub fn top_text(&self) -> &str {
        self.top.as_deref().unwrap_or("")
    }

    pub fn bottom_text(&self) -> &str {
        self.bottom.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDef {
    pub action: KeyAction,
    pub label: Label,
    pub color: Option<Rgb>,
    pub hold: bool,
    pub no_repeat: bool,
    pub allow_abort: bool,
    pub switcher: Option<Switcher>,
}

impl KeyDef {
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            action: KeyAction::Key {
                name: name.into(),
                modifier: None,
            },
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// The parts of this key another scope may inherit through `extends`.
    pub fn inheritable(&self) -> KeyDef {
        KeyDef {
            switcher: None,
            ..self.clone()
        }
    }

    pub fn is_switcher(&self) -> bool {
        self.switcher.is_some()
    }

    /// A key that only decorates its slot: no action and no switcher.
    pub fn is_label_only(&self) -> bool {
        self.action.is_none() && self.switcher.is_none()
    }

    /// Whether the key produces anything at all in the output.
    pub fn has_content(&self) -> bool {
        !self.is_label_only()
            || !self.label.is_empty()
            || self.color.is_some()
            || self.no_repeat
            || self.allow_abort
    }
}
