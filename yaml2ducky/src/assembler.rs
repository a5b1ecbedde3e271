use duckypad_core::CompileError;
use log::debug;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Turns prepared duckyScript text into device bytecode at `output`.
pub trait Assembler {
    fn assemble(&self, source: &str, output: &Path) -> Result<(), CompileError>;
}

/// Runs an external assembler as `<program> [args...] <input.txt> <output>`.
#[derive(Debug, Clone)]
pub struct CommandAssembler {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandAssembler {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Assembler for CommandAssembler {
    fn assemble(&self, source: &str, output: &Path) -> Result<(), CompileError> {
        let failed = |message: String| CompileError::Assembler {
            file: output.display().to_string(),
            message,
        };

        let mut input = tempfile::Builder::new()
            .prefix("ducky-")
            .suffix(".txt")
            .tempfile()?;
        input.write_all(source.as_bytes())?;
        input.flush()?;

        debug!(
            "Running {} on {} -> {}",
            self.program.display(),
            input.path().display(),
            output.display()
        );

        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(input.path())
            .arg(output)
            .output()
            .map_err(|e| failed(format!("could not run {}: {}", self.program.display(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stdout = String::from_utf8_lossy(&result.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(failed(format!("{} ({})", detail, result.status)));
        }

        Ok(())
    }
}
