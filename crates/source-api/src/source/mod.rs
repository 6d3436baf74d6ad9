//! Concrete places artifacts can be read from.
//!
//! A [`Source`] answers lookups for normalized resource paths (`a/b/C.class`).
//! Sources are stacked in a [`SourceSet`], which is how both the isolated
//! application tree and the shared host classpath are modelled.

mod archive;
mod directory;
mod entry;
mod memory;
mod set;

pub use archive::ArchiveSource;
pub use directory::DirectorySource;
pub use entry::SourceEntry;
pub use memory::MemorySource;
pub use set::SourceSet;

use crate::error::SourceError;
use crate::types::Artifact;

/// A single classpath element.
pub trait Source: Send + Sync {
    /// Human readable description used in log events.
    fn describe(&self) -> String;

    /// The classpath entry this source was opened from, if it has one.
    fn entry(&self) -> Option<&SourceEntry> {
        None
    }

    /// Look up a normalized resource path.
    ///
    /// Absence is `Ok(None)`; errors are reserved for unreadable storage.
    fn find(&self, path: &str) -> Result<Option<Artifact>, SourceError>;
}
