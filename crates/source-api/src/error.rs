use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading from a [`Source`](crate::Source).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying file or directory could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundle exists but is not a readable tar archive.
    #[error("failed to index archive {path}")]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A classpath entry points at something that is neither a directory nor a file.
    #[error("classpath entry {path} is neither a directory nor an archive")]
    UnsupportedEntry { path: PathBuf },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a host-side location could not be registered with an isolation boundary.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The artifact's location has no containing directory or archive.
    #[error("found resource but unrecognized location format: '{location}'")]
    UnrecognizedLocation { location: String },

    /// The location does not end with the resource path it supposedly holds.
    #[error("location '{location}' does not contain resource '{resource}'")]
    LocationMismatch { location: String, resource: String },

    /// The containing entry was derived but could not be opened as a source.
    #[error("failed to add containing entry '{entry}'")]
    Open {
        entry: String,
        #[source]
        source: SourceError,
    },
}

/// Errors that can occur when mutating the [`ModuleRegistry`](crate::ModuleRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleRegistryError {
    /// A factory attempted to register an identifier that already exists in the registry.
    #[error("module id '{id}' is already registered")]
    DuplicateId { id: &'static str },
}
