pub const DEFAULT_DELAY: &str = "DEFAULTDELAY 0";
pub const GOTO_PROFILE: &str = "GOTO_PROFILE";

/// duckyScript text under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn key_down(&mut self, key: &str) {
        self.push(format!("KEYDOWN {}", key));
    }

    pub fn key_up(&mut self, key: &str) {
        self.push(format!("KEYUP {}", key));
    }

    pub fn goto(&mut self, profile: &str) {
        self.push(format!("{} {}", GOTO_PROFILE, profile));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Final file text. An empty script renders as an empty file; anything
    /// else opens with `DEFAULTDELAY 0` and ends with a newline.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut text = String::from(DEFAULT_DELAY);
        text.push('\n');
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Press script plus the release script, when the key needs one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScripts {
    pub press: Script,
    pub release: Option<Script>,
}

impl KeyScripts {
    pub fn press_only(press: Script) -> Self {
        Self {
            press,
            release: None,
        }
    }

    pub fn with_release(press: Script, release: Script) -> Self {
        Self {
            press,
            release: Some(release),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render() {
        let mut script = Script::new();
        assert_eq!(script.render(), "");

        script.key_down("CTRL");
        script.goto("Foxhole-Ctrl");
        assert_eq!(
            script.render(),
            "DEFAULTDELAY 0\nKEYDOWN CTRL\nGOTO_PROFILE Foxhole-Ctrl\n"
        );
    }
}
