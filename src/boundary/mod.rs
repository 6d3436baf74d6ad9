//! The isolation boundary: one generation's view of the application tree.
//!
//! A boundary owns everything that must not outlive a reload: the positive
//! lookup cache, the host entries admitted on demand, provenance records and
//! module instances. The host classpath and the precedence rules are shared
//! read-only with every other generation.
//!
//! Lookups follow the classification of the requested name:
//!
//! * forced-system names are answered by the host only;
//! * forced-isolated names are answered by the isolated tree only, even when the
//!   host carries a copy;
//! * everything else tries the isolated tree first and falls back to the host,
//!   admitting the host-side directory or archive so that related lookups are
//!   served by the boundary itself from then on.

mod admission;
mod define;
mod generation;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use strata_source_api::{Artifact, SourceEntry, SourceSet};
use tracing::{Span, info_span, trace};

use crate::name::ResourceName;
use crate::provenance::ProvenanceLog;
use crate::rules::{Classification, PrecedenceRules};

pub use define::{DefineError, DefinedModule};
pub use generation::Generation;

/// Knobs fixed for a boundary's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryOptions {
	/// Log host fallbacks at warn level; debug otherwise.
	pub warn_on_host_fallback: bool,
}

impl Default for BoundaryOptions {
	fn default() -> Self {
		Self {
			warn_on_host_fallback: true,
		}
	}
}

pub struct IsolationBoundary {
	generation: Generation,
	rules: Arc<PrecedenceRules>,
	tree: SourceSet,
	host: Arc<SourceSet>,
	admitted: RwLock<SourceSet>,
	cache: RwLock<HashMap<String, Arc<Artifact>>>,
	modules: RwLock<HashMap<String, Arc<DefinedModule>>>,
	provenance: ProvenanceLog,
	admission: Mutex<()>,
	options: BoundaryOptions,
	retired: AtomicBool,
	span: Span,
}

impl IsolationBoundary {
	pub fn new(
		generation: Generation,
		rules: Arc<PrecedenceRules>,
		tree: SourceSet,
		host: Arc<SourceSet>,
		options: BoundaryOptions,
		parent: &Span,
	) -> Self {
		let span = info_span!(parent: parent, "boundary", generation = generation.get());
		Self {
			generation,
			rules,
			tree,
			host,
			admitted: RwLock::new(SourceSet::new()),
			cache: RwLock::new(HashMap::new()),
			modules: RwLock::new(HashMap::new()),
			provenance: ProvenanceLog::new(),
			admission: Mutex::new(()),
			options,
			retired: AtomicBool::new(false),
			span,
		}
	}

	/// Resolve `name` against this generation.
	///
	/// Within one generation a name always resolves to the same artifact: the
	/// first successful answer is cached and every later lookup, concurrent or
	/// not, observes that same `Arc`. Misses are not cached, because a later
	/// admission may make the name visible.
	pub fn resolve(&self, name: &ResourceName) -> Option<Arc<Artifact>> {
		if let Some(cached) = self.cache.read().get(name.path()) {
			return Some(Arc::clone(cached));
		}

		let classification = self.classify(name);
		let found = match classification {
			Classification::ForcedSystem => self.host.find(name.path()),
			Classification::ForcedIsolated => self.find_isolated(name.path()),
			Classification::Default => self
				.find_isolated(name.path())
				.or_else(|| self.escape(name)),
		};

		let Some(artifact) = found else {
			trace!(parent: &self.span, name = %name, %classification, "not found");
			return None;
		};
		Some(self.publish(name.path(), artifact))
	}

	pub fn classify(&self, name: &ResourceName) -> Classification {
		self.rules.classify(name.dotted())
	}

	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn rules(&self) -> &PrecedenceRules {
		&self.rules
	}

	pub fn provenance(&self) -> &ProvenanceLog {
		&self.provenance
	}

	/// Host entries admitted during this generation, in admission order.
	pub fn admitted_entries(&self) -> Vec<SourceEntry> {
		self.admitted.read().entries().cloned().collect()
	}

	pub fn is_cached(&self, name: &ResourceName) -> bool {
		self.cache.read().contains_key(name.path())
	}

	pub fn cached_len(&self) -> usize {
		self.cache.read().len()
	}

	/// A retired boundary still answers from what it already holds but no
	/// longer admits host entries.
	pub fn is_retired(&self) -> bool {
		self.retired.load(Ordering::Acquire)
	}

	pub(crate) fn retire(&self) {
		self.retired.store(true, Ordering::Release);
	}

	pub fn span(&self) -> &Span {
		&self.span
	}

	fn find_isolated(&self, path: &str) -> Option<Artifact> {
		if let Some(found) = self.tree.find(path) {
			return Some(found);
		}
		self.admitted.read().find(path)
	}

	fn escape(&self, name: &ResourceName) -> Option<Artifact> {
		let found = self.host.find(name.path())?;
		self.admit(name, found)
	}

	fn publish(&self, path: &str, artifact: Artifact) -> Arc<Artifact> {
		let mut cache = self.cache.write();
		let entry = cache
			.entry(path.to_string())
			.or_insert_with(|| Arc::new(artifact));
		Arc::clone(entry)
	}
}

impl std::fmt::Debug for IsolationBoundary {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IsolationBoundary")
			.field("generation", &self.generation)
			.field("tree", &self.tree.len())
			.field("admitted", &self.admitted.read().len())
			.field("cached", &self.cached_len())
			.field("retired", &self.is_retired())
			.finish()
	}
}
