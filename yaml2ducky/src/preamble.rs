//! Per-key behavior flags prepended to press scripts before assembly.

use duckypad_core::{KeyId, KeyMap};
use std::collections::BTreeSet;

pub const ALLOW_ABORT_LINE: &str = "$_ALLOW_ABORT = 1";
pub const DONT_REPEAT_LINE: &str = "$_DONT_REPEAT = 1";

/// Keys carrying the allow-abort and no-repeat flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDirectives {
    pub allow_abort: BTreeSet<KeyId>,
    pub no_repeat: BTreeSet<KeyId>,
}

impl KeyDirectives {
    pub fn from_keys(keys: &KeyMap) -> Self {
        let mut directives = Self::default();
        for (&id, def) in keys {
            if def.allow_abort {
                directives.allow_abort.insert(id);
            }
            if def.no_repeat {
                directives.no_repeat.insert(id);
            }
        }
        directives
    }

    /// Read the `ab <N>` and `dr <N>` lines of a `config.txt`.
    pub fn parse_settings(content: &str) -> Self {
        let mut directives = Self::default();

        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };
            let Some(id) = value.parse::<i64>().ok().and_then(KeyId::new) else {
                continue;
            };

            match name {
                "ab" => {
                    directives.allow_abort.insert(id);
                }
                "dr" => {
                    directives.no_repeat.insert(id);
                }
                _ => {}
            }
        }

        directives
    }

    pub fn for_key(&self, key: KeyId) -> (bool, bool) {
        (self.allow_abort.contains(&key), self.no_repeat.contains(&key))
    }
}

/// Prepend the flag lines to `script`: abort first, then no-repeat, ahead
/// of everything else. A flag block already at the top of the script is
/// merged rather than repeated, so injecting twice changes nothing.
pub fn inject_preamble(script: &str, allow_abort: bool, no_repeat: bool) -> String {
    let mut abort = allow_abort;
    let mut repeat = no_repeat;
    let mut body = script;

    loop {
        let (line, rest) = body.split_once('\n').unwrap_or((body, ""));
        match line.trim() {
            ALLOW_ABORT_LINE => abort = true,
            DONT_REPEAT_LINE => repeat = true,
            _ => break,
        }
        body = rest;
    }

    if !allow_abort && !no_repeat {
        return script.to_string();
    }

    let mut text = String::with_capacity(script.len() + 40);
    if abort {
        text.push_str(ALLOW_ABORT_LINE);
        text.push('\n');
    }
    if repeat {
        text.push_str(DONT_REPEAT_LINE);
        text.push('\n');
    }
    text.push_str(body);
    text
}
