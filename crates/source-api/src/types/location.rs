use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::AdmissionError;
use crate::source::SourceEntry;

/// Where the bytes of an [`Artifact`](crate::Artifact) were read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// A loose file below a directory root.
    File { path: PathBuf },
    /// An entry inside a jar or tar bundle.
    Archive { archive: PathBuf, entry: String },
    /// Anything without a containing directory or archive, such as in-memory blobs.
    Opaque { label: String },
}

impl Location {
    /// Derive the classpath entry that holds `resource_path` at this location.
    ///
    /// A file location must end with the resource path component-wise; the
    /// remaining prefix is the directory root. An archive location yields the
    /// archive itself. Opaque locations cannot be admitted anywhere.
    pub fn containing_entry(&self, resource_path: &str) -> Result<SourceEntry, AdmissionError> {
        match self {
            Self::File { path } => {
                let resource = Path::new(resource_path);
                let depth = resource.components().count();
                if depth == 0 || !path.ends_with(resource) {
                    return Err(self.mismatch(resource_path));
                }
                path.ancestors()
                    .nth(depth)
                    .map(|root| SourceEntry::Directory(root.to_path_buf()))
                    .ok_or_else(|| self.mismatch(resource_path))
            }
            Self::Archive { archive, entry } => {
                if entry != resource_path {
                    return Err(self.mismatch(resource_path));
                }
                Ok(SourceEntry::Archive(archive.clone()))
            }
            Self::Opaque { .. } => Err(AdmissionError::UnrecognizedLocation {
                location: self.to_string(),
            }),
        }
    }

    fn mismatch(&self, resource_path: &str) -> AdmissionError {
        AdmissionError::LocationMismatch {
            location: self.to_string(),
            resource: resource_path.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "file:{}", path.display()),
            Self::Archive { archive, entry } => write!(f, "archive:{}!/{entry}", archive.display()),
            Self::Opaque { label } => f.write_str(label),
        }
    }
}
