use super::color::Rgb;
use super::key::KeyId;
use super::limits::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn max_label_line(self) -> usize {
        match self {
            Orientation::Portrait => MAX_LABEL_CHARS_PER_LINE_PORTRAIT,
            Orientation::Landscape => MAX_LABEL_CHARS_PER_LINE_LANDSCAPE,
        }
    }

    pub fn max_label_total(self) -> usize {
        match self {
            Orientation::Portrait => MAX_LABEL_CHARS_PORTRAIT,
            Orientation::Landscape => MAX_LABEL_CHARS_LANDSCAPE,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(format!(
                "unknown orientation '{}', expected portrait or landscape",
                other
            )),
        }
    }
}

/// Display settings of one profile or layer. Fields left `None` are not
/// written to the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub orientation: Option<Orientation>,
    pub background_color: Option<Rgb>,
    pub dim_unused: Option<bool>,
    pub keydown_color: Option<Rgb>,
}

impl ProfileConfig {
    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }
}

/// Generated duckyScript for one key slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScript {
    pub key: KeyId,
    pub press: String,
    pub release: Option<String>,
}

impl ResolvedScript {
    pub fn new(key: KeyId, press: String) -> Self {
        Self {
            key,
            press,
            release: None,
        }
    }

    pub fn with_release(mut self, release: String) -> Self {
        self.release = Some(release);
        self
    }
}
