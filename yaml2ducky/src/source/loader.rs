use super::ast::{SourceFile, TemplateFile, TemplateNode};
use duckypad_core::CompileError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse a YAML profile definition.
pub fn load_source_file(path: &Path) -> Result<SourceFile, CompileError> {
    let content = fs::read_to_string(path)?;
    parse_source(&content, &path.display().to_string())
}

/// Parse a YAML profile definition held in memory. `origin` names the
/// document in error messages.
pub fn parse_source(content: &str, origin: &str) -> Result<SourceFile, CompileError> {
    // Strip UTF-8 BOM if present
    let content = content.trim_start_matches('\u{FEFF}');

    serde_yaml::from_str(content).map_err(|e| CompileError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Load `<dir>/<name>.yaml`. Returns `Ok(None)` when no such file exists.
pub fn load_template_file(dir: &Path, name: &str) -> Result<Option<TemplateNode>, CompileError> {
    let path = dir.join(format!("{}.yaml", name));
    if !path.is_file() {
        debug!("Template '{}' not found at {}", name, path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let content = content.trim_start_matches('\u{FEFF}');
    let file: TemplateFile = serde_yaml::from_str(content).map_err(|e| CompileError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!("Loaded template '{}' from {}", name, path.display());
    Ok(Some(file.template))
}

/// Templates directory used when none is given: `templates/` beside the
/// input's parent directory, else beside the input itself.
pub fn default_templates_dir(input: &Path) -> Option<PathBuf> {
    let input_dir = input.parent().unwrap_or_else(|| Path::new("."));

    let sibling = input_dir.parent().map(|p| p.join("templates"));
    if let Some(dir) = sibling.filter(|d| d.is_dir()) {
        return Some(dir);
    }

    let nested = input_dir.join("templates");
    nested.is_dir().then_some(nested)
}
