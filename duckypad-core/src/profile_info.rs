//! Profile name to index table read from the SD card's `profile_info.txt`

use crate::types::errors::CompileError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PROFILE_INFO_FILE: &str = "profile_info.txt";

/// Subtracted from a 1-based ordinal to get the `GOTO_PROFILE` operand.
///
/// The firmware documentation disagrees on whether `GOTO_PROFILE` takes the
/// ordinal itself or ordinal - 1. Set this to 0 for the former.
pub const PROFILE_INDEX_OFFSET: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEntry {
    pub ordinal: u32,
    pub name: String,
}

impl ProfileEntry {
    pub fn operand(&self) -> Option<u32> {
        self.ordinal.checked_sub(PROFILE_INDEX_OFFSET)
    }
}

/// Ordered `(ordinal, name)` table. Lines look like `"3 Foxhole-Ctrl"`;
/// names may contain spaces and hyphens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileIndex {
    entries: Vec<ProfileEntry>,
    by_name: BTreeMap<String, usize>,
}

impl ProfileIndex {
    pub fn parse(content: &str) -> Self {
        let mut index = ProfileIndex::default();
        let content = content.trim_start_matches('\u{FEFF}');

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((number, name)) = line.split_once(char::is_whitespace) else {
                debug!("profile_info line {}: no name, skipped", line_no + 1);
                continue;
            };
            let name = name.trim();
            let ordinal = match number.parse::<u32>() {
                Ok(n) if n >= 1 && !name.is_empty() => n,
                _ => {
                    debug!("profile_info line {}: malformed, skipped", line_no + 1);
                    continue;
                }
            };

            if index.by_name.contains_key(name) {
                warn!(
                    "profile_info line {}: duplicate profile name '{}', keeping first",
                    line_no + 1,
                    name
                );
                continue;
            }

            index.by_name.insert(name.to_string(), index.entries.len());
            index.entries.push(ProfileEntry {
                ordinal,
                name: name.to_string(),
            });
        }

        index
    }

    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn ordinal_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).map(|&i| self.entries[i].ordinal)
    }

    /// Numeric `GOTO_PROFILE` operand for `name`.
    pub fn operand_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).and_then(|&i| self.entries[i].operand())
    }
}
