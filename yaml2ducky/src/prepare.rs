//! Final passes over generated scripts before they reach the assembler:
//! flag preamble first, then profile name resolution.

use crate::assembler::Assembler;
use crate::codegen::{ProfileOutput, SETTINGS_FILE};
use crate::names::{resolve_script, UnresolvedReference};
use crate::preamble::{inject_preamble, KeyDirectives};
use duckypad_core::{CompileError, KeyId, ProfileIndex};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const BYTECODE_EXTENSION: &str = "dsb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedScript {
    pub file_name: String,
    pub key: KeyId,
    pub is_release: bool,
    pub text: String,
}

impl PreparedScript {
    /// `key3.txt` assembles to `key3.dsb`.
    pub fn output_name(&self) -> String {
        let stem = self.file_name.strip_suffix(".txt").unwrap_or(&self.file_name);
        format!("{}.{}", stem, BYTECODE_EXTENSION)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreparedProfile {
    pub name: String,
    pub dir: Option<PathBuf>,
    pub scripts: Vec<PreparedScript>,
    pub unresolved: Vec<UnresolvedReference>,
}

/// Parse `key<N>.txt` / `key<N>-release.txt`.
pub fn parse_key_file_name(file_name: &str) -> Option<(KeyId, bool)> {
    let stem = file_name.strip_prefix("key")?.strip_suffix(".txt")?;
    let (number, is_release) = match stem.strip_suffix("-release") {
        Some(number) => (number, true),
        None => (stem, false),
    };

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let key = KeyId::new(number.parse().ok()?)?;
    Some((key, is_release))
}

/// Run both passes over one script. Release scripts get name resolution
/// only.
#[allow(clippy::too_many_arguments)]
pub fn prepare_script(
    text: &str,
    key: KeyId,
    is_release: bool,
    directives: &KeyDirectives,
    index: Option<&ProfileIndex>,
    profile: &str,
    file_name: &str,
    unresolved: &mut Vec<UnresolvedReference>,
) -> String {
    let text = if is_release {
        text.to_string()
    } else {
        let (allow_abort, no_repeat) = directives.for_key(key);
        inject_preamble(text, allow_abort, no_repeat)
    };

    match index {
        Some(index) => resolve_script(&text, index, profile, file_name, unresolved),
        None => text,
    }
}

/// Prepare an in-memory output using the flags of its resolved keys.
pub fn prepare_output(output: &ProfileOutput, index: Option<&ProfileIndex>) -> PreparedProfile {
    let directives = KeyDirectives::from_keys(&output.keys);
    let mut prepared = PreparedProfile {
        name: output.name.clone(),
        ..Default::default()
    };

    for script in &output.scripts {
        let mut sides = vec![(script.key.press_file_name(), false, &script.press)];
        if let Some(release) = &script.release {
            sides.push((script.key.release_file_name(), true, release));
        }

        for (file_name, is_release, text) in sides {
            let text = prepare_script(
                text,
                script.key,
                is_release,
                &directives,
                index,
                &output.name,
                &file_name,
                &mut prepared.unresolved,
            );
            prepared.scripts.push(PreparedScript {
                file_name,
                key: script.key,
                is_release,
                text,
            });
        }
    }

    prepared
}

/// Prepare every key script in a generated profile directory, reading the
/// flags from its `config.txt`. Files on disk are not modified.
pub fn prepare_profile_dir(
    dir: &Path,
    index: Option<&ProfileIndex>,
) -> Result<PreparedProfile, CompileError> {
    let settings_path = dir.join(SETTINGS_FILE);
    let directives = if settings_path.is_file() {
        KeyDirectives::parse_settings(&fs::read_to_string(&settings_path)?)
    } else {
        KeyDirectives::default()
    };

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some((key, is_release)) = parse_key_file_name(&file_name) {
            files.push((key, is_release, file_name, entry.path()));
        }
    }
    files.sort();

    let mut prepared = PreparedProfile {
        name,
        dir: Some(dir.to_path_buf()),
        ..Default::default()
    };

    for (key, is_release, file_name, path) in files {
        let content = fs::read_to_string(&path)?;
        let text = prepare_script(
            content.trim_start_matches('\u{FEFF}'),
            key,
            is_release,
            &directives,
            index,
            &prepared.name,
            &file_name,
            &mut prepared.unresolved,
        );
        prepared.scripts.push(PreparedScript {
            file_name,
            key,
            is_release,
            text,
        });
    }

    debug!("Prepared {} scripts in {}", prepared.scripts.len(), dir.display());
    Ok(prepared)
}

/// Assemble each prepared script into `out_dir`. Stops at the first
/// assembler failure.
pub fn assemble_prepared(
    prepared: &PreparedProfile,
    out_dir: &Path,
    assembler: &dyn Assembler,
) -> Result<Vec<PathBuf>, CompileError> {
    let mut written = Vec::with_capacity(prepared.scripts.len());

    for script in &prepared.scripts {
        let output = out_dir.join(script.output_name());
        assembler.assemble(&script.text, &output)?;
        written.push(output);
    }

    info!(
        "Assembled {} scripts for '{}'",
        written.len(),
        prepared.name
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_key_file_name() {
        let key = |n| KeyId::new(n).unwrap();
        assert_eq!(parse_key_file_name("key1.txt"), Some((key(1), false)));
        assert_eq!(parse_key_file_name("key26-release.txt"), Some((key(26), true)));
        assert_eq!(parse_key_file_name("key27.txt"), None);
        assert_eq!(parse_key_file_name("key.txt"), None);
        assert_eq!(parse_key_file_name("key+1.txt"), None);
        assert_eq!(parse_key_file_name("config.txt"), None);
        assert_eq!(parse_key_file_name("key1.dsb"), None);
    }

    #[test]
    fn test_output_name() {
        let script = PreparedScript {
            file_name: "key3-release.txt".to_string(),
            key: KeyId::new(3).unwrap(),
            is_release: true,
            text: String::new(),
        };
        assert_eq!(script.output_name(), "key3-release.dsb");
    }

    #[test]
    fn test_release_gets_no_preamble() {
        let key = KeyId::new(1).unwrap();
        let mut directives = KeyDirectives::default();
        directives.no_repeat.insert(key);
        let index = ProfileIndex::parse("5 Home\n");
        let mut unresolved = Vec::new();

        let release = prepare_script(
            "DEFAULTDELAY 0\nGOTO_PROFILE Home\n",
            key,
            true,
            &directives,
            Some(&index),
            "P",
            "key1-release.txt",
            &mut unresolved,
        );
        assert!(!release.contains("$_DONT_REPEAT"));
        assert!(!release.contains("Home"));

        let press = prepare_script(
            "DEFAULTDELAY 0\nGOTO_PROFILE Away\n",
            key,
            false,
            &directives,
            Some(&index),
            "P",
            "key1.txt",
            &mut unresolved,
        );
        assert!(press.starts_with("$_DONT_REPEAT = 1\n"));
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].name, "Away");
        assert_eq!(unresolved[0].file, "key1.txt");
    }
}
