use super::keydef::normalize_key;
use super::range::expand_key_map;
use crate::source::{load_template_file, KeyValue, TemplateNode};
use duckypad_core::{CompileError, KeyId, KeyMap, Orientation, TOTAL_KEYS};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Named templates available to one compilation run.
///
/// Inline templates from the source document shadow files in the templates
/// directory. Files are read on first use and kept for the rest of the run.
pub struct TemplateRegistry {
    inline: BTreeMap<String, TemplateNode>,
    templates_dir: Option<PathBuf>,
    loaded: BTreeMap<String, TemplateNode>,
}

impl TemplateRegistry {
    pub fn new(inline: BTreeMap<String, TemplateNode>) -> Self {
        Self {
            inline,
            templates_dir: None,
            loaded: BTreeMap::new(),
        }
    }

    pub fn with_templates_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.templates_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    pub fn lookup(&mut self, name: &str, scope: &str) -> Result<&TemplateNode, CompileError> {
        if self.inline.contains_key(name) {
            return self.inline.get(name).ok_or_else(|| unknown(name, scope));
        }

        if !self.loaded.contains_key(name) {
            let node = match &self.templates_dir {
                Some(dir) => load_template_file(dir, name)?,
                None => None,
            }
            .ok_or_else(|| unknown(name, scope))?;
            self.loaded.insert(name.to_string(), node);
        }

        self.loaded.get(name).ok_or_else(|| unknown(name, scope))
    }

    /// Fold the named templates into one key map. Later templates override
    /// earlier ones key by key.
    pub fn resolve(
        &mut self,
        names: &[String],
        orientation: Orientation,
        scope: &str,
    ) -> Result<KeyMap, CompileError> {
        let mut keys = KeyMap::new();

        for name in names {
            let template = self.lookup(name, scope)?;
            let template_scope = format!("template '{}'", name);
            let values = template_values(template, name, orientation, &template_scope)?;

            debug!(
                "Template '{}' contributes {} keys to {}",
                name,
                values.len(),
                scope
            );

            for (id, value) in values {
                keys.insert(id, normalize_key(&value, id, &template_scope)?);
            }
        }

        Ok(keys)
    }
}

fn unknown(name: &str, scope: &str) -> CompileError {
    CompileError::UnknownTemplate {
        scope: scope.to_string(),
        name: name.to_string(),
    }
}

fn template_values(
    template: &TemplateNode,
    name: &str,
    orientation: Orientation,
    scope: &str,
) -> Result<BTreeMap<KeyId, KeyValue>, CompileError> {
    let definitions = match &template.key_definitions {
        Some(definitions) => definitions,
        None => return expand_key_map(&template.keys, scope),
    };

    let positions = match template.key_positions.get(orientation.as_str()) {
        Some(positions) if !positions.is_empty() => positions,
        _ => {
            let supported = &template.supported_orientations;
            if !supported.is_empty() && !supported.iter().any(|o| o == orientation.as_str()) {
                warn!(
                    "Template '{}' does not support {} orientation",
                    name, orientation
                );
            }
            return Ok(BTreeMap::new());
        }
    };

    let mut values = BTreeMap::new();
    for (key_name, &slot) in positions {
        let id = KeyId::new(slot).ok_or_else(|| CompileError::KeyIdOutOfRange {
            scope: scope.to_string(),
            id: slot,
            max: TOTAL_KEYS,
        })?;

        match definitions.get(key_name) {
            Some(value) => {
                values.insert(id, value.clone());
            }
            None => warn!(
                "Key '{}' in {} key_positions has no key_definitions entry",
                key_name, scope
            ),
        }
    }

    Ok(values)
}
