use duckypad_core::{KeyMap, Orientation, ProfileConfig};

pub const SETTINGS_FILE: &str = "config.txt";

/// Render `config.txt`: key labels and no-repeat flags, profile colors and
/// flags, per-key colors, then allow-abort flags.
pub fn render_settings(config: &ProfileConfig, keys: &KeyMap) -> String {
    let mut lines = Vec::new();

    for (id, def) in keys {
        if let Some(top) = def.label.top.as_deref().filter(|t| !t.is_empty()) {
            lines.push(format!("z{} {}", id, top));
        }
        if let Some(bottom) = def.label.bottom.as_deref().filter(|b| !b.is_empty()) {
            lines.push(format!("x{} {}", id, bottom));
        }
        if def.no_repeat {
            lines.push(format!("dr {}", id));
        }
    }

    if let Some(color) = config.background_color {
        lines.push(format!("BG_COLOR {}", color));
    }

    if let Some(orientation) = config.orientation {
        lines.push(format!(
            "IS_LANDSCAPE {}",
            u8::from(orientation == Orientation::Landscape)
        ));
    }

    for (id, def) in keys {
        if let Some(color) = def.color {
            lines.push(format!("SWCOLOR_{} {}", id, color));
        }
    }

    if let Some(dim) = config.dim_unused {
        lines.push(format!("DIM_UNUSED_KEYS {}", u8::from(dim)));
    }

    if let Some(color) = config.keydown_color {
        lines.push(format!("KEYDOWN_COLOR {}", color));
    }

    for (id, def) in keys {
        if def.allow_abort {
            lines.push(format!("ab {}", id));
        }
    }

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}
