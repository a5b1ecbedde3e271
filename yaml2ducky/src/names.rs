//! Rewrites symbolic `GOTO_PROFILE <Name>` operands to the numeric form
//! the firmware expects.

use crate::codegen::{ProfileOutput, GOTO_PROFILE};
use duckypad_core::ProfileIndex;
use log::warn;
use std::collections::BTreeSet;
use std::fmt;

/// A `GOTO_PROFILE` target missing from the profile index. Not fatal, but
/// the run must end with a failure exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub profile: String,
    pub file: String,
    pub name: String,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}: GOTO_PROFILE target '{}' is not in the profile index",
            self.profile, self.file, self.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolution {
    pub text: String,
    /// Names left symbolic, in order of appearance
    pub unresolved: Vec<String>,
}

/// Replace every symbolic `GOTO_PROFILE` operand found in `index`. Numeric
/// operands and unknown names are left as they are; line endings are kept.
pub fn resolve_names(script: &str, index: &ProfileIndex) -> NameResolution {
    let mut text = String::with_capacity(script.len());
    let mut unresolved = Vec::new();

    for line in script.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);

        match goto_operand(body) {
            Some(name) if !is_numeric(name) => match index.operand_of(name) {
                Some(operand) => {
                    let indent = &body[..body.len() - body.trim_start().len()];
                    text.push_str(&format!("{}{} {}{}", indent, GOTO_PROFILE, operand, ending));
                }
                None => {
                    unresolved.push(name.to_string());
                    text.push_str(line);
                }
            },
            _ => text.push_str(line),
        }
    }

    NameResolution { text, unresolved }
}

/// Convenience wrapper that logs and records unresolved names against
/// `profile`/`file`.
pub fn resolve_script(
    script: &str,
    index: &ProfileIndex,
    profile: &str,
    file: &str,
    unresolved: &mut Vec<UnresolvedReference>,
) -> String {
    let resolution = resolve_names(script, index);

    for name in resolution.unresolved {
        let reference = UnresolvedReference {
            profile: profile.to_string(),
            file: file.to_string(),
            name,
        };
        warn!("{}", reference);
        unresolved.push(reference);
    }

    resolution.text
}

/// Symbolic profile names referenced by `GOTO_PROFILE` lines.
pub fn goto_targets(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter_map(goto_operand)
        .filter(|name| !is_numeric(name))
        .collect()
}

/// `GOTO_PROFILE` targets in `outputs` that are neither in `index` nor
/// among the outputs themselves. Profiles generated in the same run are not
/// on the card yet, so they count as known.
pub fn unresolved_targets(
    outputs: &[ProfileOutput],
    index: &ProfileIndex,
) -> Vec<UnresolvedReference> {
    let generated: BTreeSet<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
    let mut unresolved = Vec::new();

    for output in outputs {
        for (file, content) in output.files() {
            for name in goto_targets(&content) {
                if index.contains(name) || generated.contains(name) {
                    continue;
                }
                let reference = UnresolvedReference {
                    profile: output.name.clone(),
                    file: file.clone(),
                    name: name.to_string(),
                };
                warn!("{}", reference);
                unresolved.push(reference);
            }
        }
    }

    unresolved
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn goto_operand(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(GOTO_PROFILE)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim()).filter(|name| !name.is_empty())
}

fn is_numeric(operand: &str) -> bool {
    operand.chars().all(|c| c.is_ascii_digit())
}
