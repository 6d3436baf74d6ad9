use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::{ArchiveSource, DirectorySource, Source};
use crate::error::SourceError;

/// A directory or archive that can be placed on a classpath.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum SourceEntry {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl SourceEntry {
    /// Classify an on-disk path: directories stay directories, files are archives.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|err| SourceError::io(path, err))?;
        if metadata.is_dir() {
            Ok(Self::Directory(path.to_path_buf()))
        } else if metadata.is_file() {
            Ok(Self::Archive(path.to_path_buf()))
        } else {
            Err(SourceError::UnsupportedEntry {
                path: path.to_path_buf(),
            })
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    /// Open the entry as a [`Source`].
    pub fn open(&self) -> Result<Arc<dyn Source>, SourceError> {
        match self {
            Self::Directory(path) => Ok(Arc::new(DirectorySource::open(path)?)),
            Self::Archive(path) => Ok(Arc::new(ArchiveSource::open(path)?)),
        }
    }
}

impl fmt::Display for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
