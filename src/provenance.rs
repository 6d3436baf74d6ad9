//! Bookkeeping for artifacts that crossed from the host classpath into a boundary.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use strata_source_api::{Location, SourceEntry};

/// Marks that `name` was pulled in from the host rather than the isolated tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvenanceRecord {
	/// Normalized resource path.
	pub name: String,
	/// Where the host copy was found.
	pub location: Location,
	/// Directory or archive admitted to serve it.
	pub containing: SourceEntry,
	/// Whether a warning-level event was emitted for it.
	pub warned: bool,
}

/// Per-boundary provenance map, one record per resource name.
#[derive(Debug, Default)]
pub struct ProvenanceLog {
	records: RwLock<HashMap<String, ProvenanceRecord>>,
}

impl ProvenanceLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.records.read().contains_key(name)
	}

	/// Insert a record unless one exists already. Returns `true` when inserted.
	pub fn record(&self, record: ProvenanceRecord) -> bool {
		let mut records = self.records.write();
		if records.contains_key(&record.name) {
			return false;
		}
		records.insert(record.name.clone(), record);
		true
	}

	pub fn get(&self, name: &str) -> Option<ProvenanceRecord> {
		self.records.read().get(name).cloned()
	}

	/// Snapshot of every record, sorted by name.
	pub fn records(&self) -> Vec<ProvenanceRecord> {
		let mut records: Vec<_> = self.records.read().values().cloned().collect();
		records.sort_by(|a, b| a.name.cmp(&b.name));
		records
	}

	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}
}
