use std::sync::Arc;

use tracing::warn;

use super::{Source, SourceEntry};
use crate::types::Artifact;

/// Ordered list of sources; the first source that has a path wins.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Arc<dyn Source>) {
        self.sources.push(source);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with<S>(mut self, source: S) -> Self
    where
        S: Source + 'static,
    {
        self.push(Arc::new(source));
        self
    }

    /// Query each source in order.
    ///
    /// A source that fails to read is logged and skipped so one damaged entry
    /// does not hide the rest of the classpath.
    pub fn find(&self, path: &str) -> Option<Artifact> {
        for source in &self.sources {
            match source.find(path) {
                Ok(Some(artifact)) => return Some(artifact),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        source = %source.describe(),
                        name = path,
                        error = %err,
                        "skipping unreadable classpath source"
                    );
                }
            }
        }
        None
    }

    /// Returns `true` if a source opened from `entry` is already present.
    pub fn contains_entry(&self, entry: &SourceEntry) -> bool {
        self.entries().any(|existing| existing == entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SourceEntry> {
        self.sources.iter().filter_map(|source| source.entry())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Source>> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
