use std::sync::Arc;

use super::Location;

/// Bytes resolved for a single resource path, together with where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: String,
    bytes: Arc<[u8]>,
    location: Location,
}

impl Artifact {
    pub fn new(path: impl Into<String>, bytes: impl Into<Arc<[u8]>>, location: Location) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
            location,
        }
    }

    /// Normalized resource path this artifact answers.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the underlying buffer.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}
