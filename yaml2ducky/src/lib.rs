pub mod assembler;
pub mod codegen;
pub mod names;
pub mod preamble;
pub mod prepare;
pub mod resolve;
pub mod session;
pub mod source;
pub mod validate;
pub mod writer;

pub use duckypad_core::*;

pub use assembler::{Assembler, CommandAssembler};
pub use codegen::ProfileOutput;
pub use names::UnresolvedReference;
pub use session::CompileSession;
pub use writer::OutputWriter;

use log::info;
use resolve::{resolve_profile, TemplateRegistry};
use source::{default_templates_dir, load_source_file, parse_source, SourceFile};
use std::path::{Path, PathBuf};

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub outputs: Vec<ProfileOutput>,
    /// Directories written, empty for a dry run
    pub written: Vec<PathBuf>,
    pub unresolved: Vec<UnresolvedReference>,
}

impl GenerateReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub fn compile_source(
    source: SourceFile,
    templates_dir: Option<&Path>,
) -> Result<Vec<ProfileOutput>> {
    let mut templates = TemplateRegistry::new(source.templates);
    if let Some(dir) = templates_dir {
        templates = templates.with_templates_dir(dir);
    }

    let resolved = resolve_profile(&source.profile, &mut templates)?;
    codegen::generate(&resolved)
}

/// Compile YAML held in memory. Only inline templates and `templates_dir`
/// are searched.
pub fn compile_profile_str(
    content: &str,
    templates_dir: Option<&Path>,
) -> Result<Vec<ProfileOutput>> {
    compile_source(parse_source(content, "<input>")?, templates_dir)
}

/// Compile a YAML file. Without `templates_dir` the default templates
/// directory next to the input is used, if there is one.
pub fn compile_profile_file(
    input: &Path,
    templates_dir: Option<&Path>,
) -> Result<Vec<ProfileOutput>> {
    let source = load_source_file(input)?;
    let templates_dir = templates_dir
        .map(Path::to_path_buf)
        .or_else(|| default_templates_dir(input));

    compile_source(source, templates_dir.as_deref())
}

/// Compile, validate and write one YAML profile definition.
///
/// Nothing is written unless every output passes validation. With an
/// index in `session`, the profile count is checked against the card and
/// `GOTO_PROFILE` targets missing from it are reported.
pub fn generate_profile(
    input: &Path,
    output_root: &Path,
    session: &mut CompileSession,
    templates_dir: Option<&Path>,
    dry_run: bool,
) -> Result<GenerateReport> {
    let outputs = compile_profile_file(input, templates_dir)?;
    let index = session.profile_index()?;

    validate::validate_outputs(&outputs, index)?;

    let unresolved = match index {
        Some(index) => names::unresolved_targets(&outputs, index),
        None => Vec::new(),
    };

    let written = if dry_run {
        info!("Dry run: {} profile(s) validated, nothing written", outputs.len());
        Vec::new()
    } else {
        OutputWriter::new(output_root).write_all(&outputs)?
    };

    Ok(GenerateReport {
        outputs,
        written,
        unresolved,
    })
}
