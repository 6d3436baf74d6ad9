use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwapOption;
use parking_lot::{Mutex, RwLock};
use strata_source_api::{ModuleRegistry, Source, SourceEntry, SourceSet};
use tracing::{Span, info_span};

use super::{ContextConfig, ContextState, LifecycleError, LifecycleListener, ReloadableContext};
use crate::boundary::Generation;

/// Assembles a [`ReloadableContext`]. The context starts out `Stopped`.
pub struct ContextBuilder {
	config: ContextConfig,
	modules: ModuleRegistry,
	listeners: Vec<Box<dyn LifecycleListener>>,
	builtins: Vec<Arc<dyn Source>>,
	parent: Span,
}

impl ContextBuilder {
	pub fn new(config: ContextConfig) -> Self {
		Self {
			config,
			modules: ModuleRegistry::new(),
			listeners: Vec::new(),
			builtins: Vec::new(),
			parent: Span::current(),
		}
	}

	pub fn modules(mut self, modules: ModuleRegistry) -> Self {
		self.modules = modules;
		self
	}

	pub fn listener<L>(mut self, listener: L) -> Self
	where
		L: LifecycleListener + 'static,
	{
		self.listeners.push(Box::new(listener));
		self
	}

	/// Extra host-side source searched after the configured classpath.
	pub fn host_source<S>(mut self, source: S) -> Self
	where
		S: Source + 'static,
	{
		self.builtins.push(Arc::new(source));
		self
	}

	/// Parent span for the context's own span.
	pub fn parent_span(mut self, parent: Span) -> Self {
		self.parent = parent;
		self
	}

	/// Open the host classpath and hand back a stopped context.
	pub fn build(self) -> Result<ReloadableContext, LifecycleError> {
		let mut host = SourceSet::new();
		for path in &self.config.host_classpath {
			let source = SourceEntry::from_path(path)
				.and_then(|entry| entry.open())
				.map_err(|source| LifecycleError::HostClasspath {
					path: path.clone(),
					source,
				})?;
			host.push(source);
		}
		for builtin in self.builtins {
			host.push(builtin);
		}

		let span = info_span!(
			parent: &self.parent,
			"webapp",
			root = %self.config.root.display(),
			context_path = %self.config.context_path,
		);

		Ok(ReloadableContext {
			rules: Arc::new(self.config.rules.clone()),
			host: Arc::new(host),
			config: self.config,
			modules: self.modules,
			listeners: self.listeners,
			active: ArcSwapOption::empty(),
			lifecycle: Mutex::new(()),
			state: RwLock::new(ContextState::Stopped),
			next_generation: AtomicU64::new(Generation::FIRST.get()),
			span,
		})
	}
}
