use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{Source, SourceEntry};
use crate::error::SourceError;
use crate::types::{Artifact, Location};

/// Loose files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    entry: SourceEntry,
}

impl DirectorySource {
    /// Open `root`, which must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, SourceError> {
        let root = root.as_ref();
        let metadata = fs::metadata(root).map_err(|err| SourceError::io(root, err))?;
        if !metadata.is_dir() {
            return Err(SourceError::io(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        Ok(Self {
            entry: SourceEntry::Directory(root.to_path_buf()),
        })
    }

    pub fn root(&self) -> &Path {
        self.entry.path()
    }

    fn candidate(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        (plain && !path.is_empty()).then(|| self.root().join(relative))
    }
}

impl Source for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root().display())
    }

    fn entry(&self) -> Option<&SourceEntry> {
        Some(&self.entry)
    }

    fn find(&self, path: &str) -> Result<Option<Artifact>, SourceError> {
        let Some(candidate) = self.candidate(path) else {
            return Ok(None);
        };

        match fs::metadata(&candidate) {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SourceError::io(candidate, err)),
        }

        let bytes = fs::read(&candidate).map_err(|err| SourceError::io(&candidate, err))?;
        Ok(Some(Artifact::new(
            path,
            bytes,
            Location::File { path: candidate },
        )))
    }
}
