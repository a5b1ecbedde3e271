//! RGB colors and color name parsing

use super::errors::CompileError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from an `[r, g, b]` list.
    pub fn from_components(components: &[i64]) -> Result<Self, CompileError> {
        if components.len() != 3 {
            return Err(CompileError::InvalidColor(format!(
                "RGB color must have exactly 3 values, got {}: {:?}",
                components.len(),
                components
            )));
        }

        let mut rgb = [0u8; 3];
        for (slot, (value, channel)) in rgb
            .iter_mut()
            .zip(components.iter().zip(["red", "green", "blue"]))
        {
            *slot = u8::try_from(*value).map_err(|_| {
                CompileError::InvalidColor(format!(
                    "RGB {} value must be 0-255, got {}",
                    channel, value
                ))
            })?;
        }

        Ok(Rgb::new(rgb[0], rgb[1], rgb[2]))
    }

    /// Parse `"#RRGGBB"`, `"RRGGBB"` or a color name such as `"dark_blue"`.
    ///
    /// # Examples
    /// ```
    /// use duckypad_core::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#FF8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert_eq!(Rgb::parse("Dark Blue").unwrap(), Rgb::new(0, 0, 139));
    /// ```
    pub fn parse(value: &str) -> Result<Self, CompileError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CompileError::InvalidColor("empty color".to_string()));
        }

        let hex = value.strip_prefix('#').unwrap_or(value);
        if value.starts_with('#') || (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())) {
            return parse_hex(hex).ok_or_else(|| {
                CompileError::InvalidColor(format!("invalid hex color format: {}", value))
            });
        }

        named_color(&normalize_name(value)).ok_or_else(|| {
            CompileError::InvalidColor(format!(
                "unknown color name '{}'; use a common color name, \"#RRGGBB\" or [r, g, b]",
                value
            ))
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Lowercase and drop separators so "Dark_Blue", "dark-blue" and
/// "dark blue" all look up the same entry.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name {
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "cyan" | "aqua" => Rgb::new(0, 255, 255),
        "magenta" | "fuchsia" => Rgb::new(255, 0, 255),
        "white" => Rgb::new(255, 255, 255),
        "black" => Rgb::new(0, 0, 0),
        "orange" => Rgb::new(255, 165, 0),
        "purple" => Rgb::new(128, 0, 128),
        "pink" => Rgb::new(255, 192, 203),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "lime" => Rgb::new(0, 255, 0),
        "navy" | "navyblue" => Rgb::new(0, 0, 128),
        "teal" => Rgb::new(0, 128, 128),
        "maroon" => Rgb::new(128, 0, 0),
        "olive" => Rgb::new(128, 128, 0),
        "silver" => Rgb::new(192, 192, 192),
        "gold" => Rgb::new(255, 215, 0),
        "coral" => Rgb::new(255, 127, 80),
        "salmon" => Rgb::new(250, 128, 114),
        "tomato" => Rgb::new(255, 99, 71),
        "crimson" => Rgb::new(220, 20, 60),
        "violet" => Rgb::new(238, 130, 238),
        "indigo" => Rgb::new(75, 0, 130),

        // Dark / light variants
        "darkblue" | "dkblue" => Rgb::new(0, 0, 139),
        "darkred" | "dkred" => Rgb::new(139, 0, 0),
        "darkgreen" | "dkgreen" => Rgb::new(0, 100, 0),
        "darkcyan" => Rgb::new(0, 139, 139),
        "darkgray" | "darkgrey" | "dkgray" | "dkgrey" => Rgb::new(169, 169, 169),
        "darkmagenta" => Rgb::new(139, 0, 139),
        "darkorange" => Rgb::new(255, 140, 0),
        "darkviolet" => Rgb::new(148, 0, 211),
        "lightblue" | "ltblue" => Rgb::new(173, 216, 230),
        "lightgreen" | "ltgreen" => Rgb::new(144, 238, 144),
        "lightgray" | "lightgrey" | "ltgray" | "ltgrey" => Rgb::new(211, 211, 211),
        "lightcyan" => Rgb::new(224, 255, 255),
        "lightpink" => Rgb::new(255, 182, 193),
        "lightyellow" => Rgb::new(255, 255, 224),

        // Named blues and greens
        "skyblue" => Rgb::new(135, 206, 235),
        "steelblue" => Rgb::new(70, 130, 180),
        "royalblue" => Rgb::new(65, 105, 225),
        "mediumblue" => Rgb::new(0, 0, 205),
        "midnightblue" => Rgb::new(25, 25, 112),
        "cadetblue" => Rgb::new(95, 158, 160),
        "powderblue" => Rgb::new(176, 224, 230),
        "cornflowerblue" => Rgb::new(100, 149, 237),
        "dodgerblue" => Rgb::new(30, 144, 255),
        "aliceblue" => Rgb::new(240, 248, 255),
        "seagreen" => Rgb::new(46, 139, 87),
        "forestgreen" => Rgb::new(34, 139, 34),
        "limegreen" => Rgb::new(50, 205, 50),
        "lawngreen" => Rgb::new(124, 252, 0),
        "springgreen" => Rgb::new(0, 255, 127),
        "olivedrab" => Rgb::new(107, 142, 35),

        // Reds and pinks
        "hotpink" => Rgb::new(255, 105, 180),
        "deeppink" => Rgb::new(255, 20, 147),
        "indianred" => Rgb::new(205, 92, 92),

        _ => return None,
    };
    Some(rgb)
}
