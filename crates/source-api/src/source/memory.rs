use std::collections::HashMap;
use std::sync::Arc;

use super::Source;
use crate::error::SourceError;
use crate::types::{Artifact, Location};

/// Named byte blobs held in memory.
///
/// Locations are opaque, so artifacts found here can be served but never
/// admitted into an isolation boundary.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    blobs: HashMap<String, Arc<[u8]>>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            blobs: HashMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.blobs.insert(path.into(), bytes.into());
    }
}

impl Source for MemorySource {
    fn describe(&self) -> String {
        format!("memory {}", self.label)
    }

    fn find(&self, path: &str) -> Result<Option<Artifact>, SourceError> {
        Ok(self.blobs.get(path).map(|bytes| {
            Artifact::new(
                path,
                Arc::clone(bytes),
                Location::Opaque {
                    label: format!("memory:{}/{path}", self.label),
                },
            )
        }))
    }
}
