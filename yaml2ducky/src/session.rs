use duckypad_core::{CompileError, ProfileIndex, PROFILE_INFO_FILE};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
struct CachedIndex {
    modified: SystemTime,
    index: ProfileIndex,
}

/// State shared by one compilation run.
///
/// Holds the profile index read from the SD card. The index is loaded on
/// first use and read again only when the file's modification time moves.
#[derive(Debug, Default)]
pub struct CompileSession {
    index_path: Option<PathBuf>,
    cache: Option<CachedIndex>,
    loads: usize,
}

impl CompileSession {
    /// A session with no profile index; name resolution is skipped.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            index_path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Use `profile_info.txt` at the root of a mounted SD card.
    pub fn with_sd_card<P: AsRef<Path>>(root: P) -> Self {
        Self::with_index_file(root.as_ref().join(PROFILE_INFO_FILE))
    }

    pub fn index_path(&self) -> Option<&Path> {
        self.index_path.as_deref()
    }

    pub fn has_index(&self) -> bool {
        self.index_path.is_some()
    }

    pub fn profile_index(&mut self) -> Result<Option<&ProfileIndex>, CompileError> {
        let path = match &self.index_path {
            Some(path) => path,
            None => return Ok(None),
        };

        let modified = fs::metadata(path)?.modified()?;
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |cached| cached.modified != modified);

        if stale {
            let index = ProfileIndex::load(path)?;
            self.loads += 1;
            if self.loads > 1 {
                info!("{} changed, reloaded {} profiles", path.display(), index.len());
            } else {
                debug!("Loaded {} profiles from {}", index.len(), path.display());
            }
            self.cache = Some(CachedIndex { modified, index });
        }

        Ok(self.cache.as_ref().map(|cached| &cached.index))
    }

    /// Times the index file has been read, for cache diagnostics.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}
