use crate::codegen::ProfileOutput;
use duckypad_core::CompileError;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes generated profile directories under one output root.
///
/// Every directory is first staged in a temporary directory inside the
/// root, then moved into place. Directories being replaced are moved aside
/// and put back if any move fails, so a failed write leaves the root as it
/// was.
pub struct OutputWriter {
    root: PathBuf,
}

/// A staged directory moved over its target, with the replaced directory
/// if there was one.
#[derive(Debug)]
struct Committed {
    target: PathBuf,
    previous: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_all(&self, outputs: &[ProfileOutput]) -> Result<Vec<PathBuf>, CompileError> {
        fs::create_dir_all(&self.root)?;

        let staging = tempfile::Builder::new()
            .prefix(".yaml2ducky-")
            .tempdir_in(&self.root)?;

        let mut moves = Vec::with_capacity(outputs.len());
        for output in outputs {
            let dir = staging.path().join(output.dir_name());
            fs::create_dir(&dir)?;
            for (file_name, content) in output.files() {
                fs::write(dir.join(&file_name), content)?;
            }
            debug!("Staged {} in {}", output.name, dir.display());
            moves.push((dir, self.root.join(output.dir_name())));
        }

        let backup = tempfile::Builder::new()
            .prefix(".yaml2ducky-old-")
            .tempdir_in(&self.root)?;

        let written = commit(&moves, backup.path())?;
        for dir in &written {
            info!("Wrote {}", dir.display());
        }

        backup.close()?;
        staging.close()?;
        Ok(written)
    }
}

/// Move each staged directory onto its target. Existing targets go into
/// `backup` first. On failure every move made so far is undone.
fn commit(moves: &[(PathBuf, PathBuf)], backup: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut done: Vec<Committed> = Vec::with_capacity(moves.len());

    for (index, (staged, target)) in moves.iter().enumerate() {
        match swap_in(staged, target, &backup.join(index.to_string())) {
            Ok(committed) => done.push(committed),
            Err(e) => {
                roll_back(&done);
                return Err(e);
            }
        }
    }

    Ok(done.into_iter().map(|c| c.target).collect())
}

fn swap_in(staged: &Path, target: &Path, aside: &Path) -> Result<Committed, CompileError> {
    let previous = if target.exists() {
        fs::rename(target, aside)?;
        Some(aside.to_path_buf())
    } else {
        None
    };

    if let Err(e) = fs::rename(staged, target) {
        if let Some(previous) = &previous {
            restore(previous, target);
        }
        return Err(e.into());
    }

    Ok(Committed {
        target: target.to_path_buf(),
        previous,
    })
}

fn roll_back(done: &[Committed]) {
    for committed in done.iter().rev() {
        if let Err(e) = fs::remove_dir_all(&committed.target) {
            warn!("Could not remove {}: {}", committed.target.display(), e);
        }
        if let Some(previous) = &committed.previous {
            restore(previous, &committed.target);
        }
    }
}

fn restore(previous: &Path, target: &Path) {
    if let Err(e) = fs::rename(previous, target) {
        warn!(
            "Could not restore {} from {}: {}",
            target.display(),
            previous.display(),
            e
        );
    }
}
