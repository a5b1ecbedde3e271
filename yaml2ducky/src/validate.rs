//! Limit checks run on generated outputs before anything is written.

use crate::codegen::ProfileOutput;
use duckypad_core::{
    KeyMap, Orientation, ProfileIndex, ValidationError, MAX_PROFILES, MAX_PROFILE_NAME_LENGTH,
    TOTAL_KEYS,
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Check every output against the device limits, stopping at the first
/// violation. `index` supplies the profiles already on the card.
pub fn validate_outputs(
    outputs: &[ProfileOutput],
    index: Option<&ProfileIndex>,
) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    let mut dirs: BTreeMap<String, &str> = BTreeMap::new();

    for output in outputs {
        match &output.layer {
            Some(id) => {
                validate_name(id, "Layer id")?;
                validate_name(&output.name, "Layer")?;
            }
            None => validate_name(&output.name, "Profile")?,
        }

        if !seen.insert(output.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: output.name.clone(),
            });
        }

        let dir = output.dir_name();
        if let Some(first) = dirs.get(&dir) {
            return Err(ValidationError::DirectoryCollision {
                first: first.to_string(),
                second: output.name.clone(),
                dir,
            });
        }
        dirs.insert(dir, &output.name);

        validate_keys(&output.keys, output.config.orientation(), &output.scope)?;
        for script in &output.scripts {
            validate_key_id(script.key.get(), &output.scope)?;
        }
    }

    validate_profile_count(outputs, index)?;

    debug!("Validated {} output profile(s)", outputs.len());
    Ok(())
}

pub fn validate_name(name: &str, context: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName {
            context: context.to_string(),
        });
    }

    let len = name.chars().count();
    if len > MAX_PROFILE_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            context: context.to_string(),
            name: name.to_string(),
            len,
            max: MAX_PROFILE_NAME_LENGTH,
        });
    }

    Ok(())
}

pub fn validate_keys(
    keys: &KeyMap,
    orientation: Orientation,
    scope: &str,
) -> Result<(), ValidationError> {
    let max_line = orientation.max_label_line();
    let max_total = orientation.max_label_total();

    for (id, def) in keys {
        validate_key_id(id.get(), scope)?;

        let lines = [def.label.top_text(), def.label.bottom_text()];
        for (line, text) in (1u8..).zip(lines) {
            if !text.is_ascii() {
                return Err(ValidationError::NonAsciiLabel {
                    scope: scope.to_string(),
                    key: id.get(),
                    text: text.to_string(),
                });
            }

            let len = text.chars().count();
            if len > max_line {
                return Err(ValidationError::LabelLineTooLong {
                    scope: scope.to_string(),
                    key: id.get(),
                    line,
                    text: text.to_string(),
                    len,
                    max: max_line,
                    orientation: orientation.to_string(),
                });
            }
        }

        let total = lines.iter().map(|l| l.chars().count()).sum::<usize>();
        if total > max_total {
            return Err(ValidationError::LabelTooLong {
                scope: scope.to_string(),
                key: id.get(),
                text: lines.join(" "),
                len: total,
                max: max_total,
                orientation: orientation.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_key_id(key: u8, scope: &str) -> Result<(), ValidationError> {
    if key == 0 || key > TOTAL_KEYS {
        return Err(ValidationError::KeyIdOutOfRange {
            scope: scope.to_string(),
            key,
            max: TOTAL_KEYS,
        });
    }
    Ok(())
}

/// Profiles already on the card plus outputs whose names are not among
/// them must fit the card's profile limit.
pub fn validate_profile_count(
    outputs: &[ProfileOutput],
    index: Option<&ProfileIndex>,
) -> Result<(), ValidationError> {
    let existing = index.map_or(0, ProfileIndex::len);
    let new = outputs
        .iter()
        .filter(|o| !index.map_or(false, |i| i.contains(&o.name)))
        .count();

    if existing + new > MAX_PROFILES {
        return Err(ValidationError::ProfileCountExceeded {
            existing,
            new,
            max: MAX_PROFILES,
        });
    }

    Ok(())
}
