//! The reloadable web app context.
//!
//! A [`ReloadableContext`] publishes at most one [`IsolationBoundary`] at a
//! time. Every start builds a new generation from scratch; readers load the
//! published boundary without locking and keep using the generation they
//! loaded until their lookup completes, even if a reload swaps in a newer one
//! meanwhile.

mod builder;
mod config;
mod error;
mod listener;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, anyhow};
use arc_swap::ArcSwapOption;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use strata_source_api::{Artifact, ModuleRegistry, SourceSet};
use tracing::{Span, debug, error, info, info_span};

use crate::boundary::{DefineError, DefinedModule, Generation, IsolationBoundary};
use crate::name::ResourceName;
use crate::rules::PrecedenceRules;

pub use builder::ContextBuilder;
pub use config::{ContextConfig, DEFAULT_CLASSES_DIR, DEFAULT_CONTEXT_PATH, DEFAULT_LIB_DIR};
pub use error::LifecycleError;
pub use listener::LifecycleListener;
pub use state::ContextState;

/// Snapshot of a context for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
	pub bind_address: Option<String>,
	pub port: u16,
	pub root: PathBuf,
	pub context_path: String,
	pub state: ContextState,
	pub generation: Option<Generation>,
}

pub struct ReloadableContext {
	config: ContextConfig,
	rules: Arc<PrecedenceRules>,
	host: Arc<SourceSet>,
	modules: ModuleRegistry,
	listeners: Vec<Box<dyn LifecycleListener>>,
	active: ArcSwapOption<IsolationBoundary>,
	lifecycle: Mutex<()>,
	state: RwLock<ContextState>,
	next_generation: AtomicU64,
	span: Span,
}

impl ReloadableContext {
	pub fn builder(config: ContextConfig) -> ContextBuilder {
		ContextBuilder::new(config)
	}

	/// Build and publish a new generation.
	pub fn start(&self) -> Result<Generation, LifecycleError> {
		let _lifecycle = self.lifecycle.lock();
		self.start_locked(&self.span)
	}

	/// Unpublish and retire the running generation.
	pub fn stop(&self) -> Result<Generation, LifecycleError> {
		let _lifecycle = self.lifecycle.lock();
		self.stop_locked(&self.span)
	}

	/// Stop the running generation and start a fresh one.
	///
	/// Runs synchronously on the calling thread and does not retry. The first
	/// failure is returned and leaves the context `Failed`.
	pub fn reload(&self) -> Result<Generation, LifecycleError> {
		let _lifecycle = self.lifecycle.lock();
		let span = info_span!(parent: &self.span, "reload", root = %self.config.root.display());

		let state = self.state();
		if !state.is_running() {
			return Err(LifecycleError::InvalidState {
				operation: "reload",
				state,
			});
		}

		info!(parent: &span, "reloading web app");
		let result = self
			.stop_locked(&span)
			.and_then(|_| self.start_locked(&span));
		match &result {
			Ok(generation) => {
				info!(parent: &span, generation = generation.get(), "reload completed successfully");
			}
			Err(err) => {
				error!(parent: &span, error = %err, "reload failed");
			}
		}
		result
	}

	/// Resolve against the published generation; `None` when nothing is running.
	pub fn resolve(&self, name: &ResourceName) -> Option<Arc<Artifact>> {
		let boundary = self.active.load_full()?;
		boundary.resolve(name)
	}

	/// [`resolve`](Self::resolve) for free-form input. Malformed names are
	/// reported as not found.
	pub fn lookup(&self, raw: &str) -> Option<Arc<Artifact>> {
		match ResourceName::parse(raw) {
			Ok(name) => self.resolve(&name),
			Err(err) => {
				debug!(parent: &self.span, name = raw, error = %err, "ignoring malformed name");
				None
			}
		}
	}

	pub fn define(&self, name: &ResourceName) -> Result<Arc<DefinedModule>, DefineError> {
		let boundary = self.active.load_full().ok_or(DefineError::NotRunning)?;
		boundary.define(name, &self.modules)
	}

	pub fn state(&self) -> ContextState {
		*self.state.read()
	}

	/// Generation currently published, if any.
	pub fn generation(&self) -> Option<Generation> {
		self.active.load().as_ref().map(|boundary| boundary.generation())
	}

	pub fn boundary(&self) -> Option<Arc<IsolationBoundary>> {
		self.active.load_full()
	}

	pub fn info(&self) -> ContextInfo {
		ContextInfo {
			bind_address: self.config.bind_address.clone(),
			port: self.config.port,
			root: self.config.root.clone(),
			context_path: self.config.context_path.clone(),
			state: self.state(),
			generation: self.generation(),
		}
	}

	pub fn config(&self) -> &ContextConfig {
		&self.config
	}

	pub fn host(&self) -> &SourceSet {
		&self.host
	}

	pub fn modules(&self) -> &ModuleRegistry {
		&self.modules
	}

	pub fn span(&self) -> &Span {
		&self.span
	}

	fn set_state(&self, state: ContextState) {
		*self.state.write() = state;
	}

	fn start_locked(&self, parent: &Span) -> Result<Generation, LifecycleError> {
		let state = self.state();
		if !state.can_start() {
			return Err(LifecycleError::InvalidState {
				operation: "start",
				state,
			});
		}

		self.set_state(ContextState::Starting);
		let generation = Generation::new(self.next_generation.fetch_add(1, Ordering::SeqCst));
		let span = info_span!(parent: parent, "start", generation = generation.get());

		match self.build_generation(generation, &span) {
			Ok(boundary) => {
				self.active.store(Some(boundary));
				self.set_state(ContextState::Running);
				info!(parent: &span, "web app started");
				Ok(generation)
			}
			Err(source) => {
				self.set_state(ContextState::Failed);
				let message = format!("{source:#}");
				error!(parent: &span, error = %message, "web app failed to start");
				Err(LifecycleError::Startup { generation, source })
			}
		}
	}

	fn build_generation(
		&self,
		generation: Generation,
		span: &Span,
	) -> anyhow::Result<Arc<IsolationBoundary>> {
		let tree = self
			.config
			.isolated_tree()
			.context("failed to open the web app tree")?;
		let boundary = Arc::new(IsolationBoundary::new(
			generation,
			Arc::clone(&self.rules),
			tree,
			Arc::clone(&self.host),
			self.config.boundary,
			span,
		));

		for listener in &self.listeners {
			listener
				.on_start(&boundary)
				.with_context(|| format!("listener '{}' failed to start", listener.name()))?;
		}

		for raw in &self.config.startup_modules {
			let name = ResourceName::class(raw)?;
			boundary.define(&name, &self.modules)?;
		}

		Ok(boundary)
	}

	fn stop_locked(&self, parent: &Span) -> Result<Generation, LifecycleError> {
		let state = self.state();
		if !state.is_running() {
			return Err(LifecycleError::InvalidState {
				operation: "stop",
				state,
			});
		}

		self.set_state(ContextState::Stopping);
		let Some(boundary) = self.active.swap(None) else {
			self.set_state(ContextState::Failed);
			return Err(LifecycleError::Teardown {
				generation: Generation::new(self.next_generation.load(Ordering::SeqCst) - 1),
				source: anyhow!("no generation was published"),
			});
		};
		boundary.retire();

		let generation = boundary.generation();
		let span = info_span!(parent: parent, "stop", generation = generation.get());

		let mut failure = None;
		for listener in &self.listeners {
			if let Err(err) = listener.on_stop(&boundary) {
				let err = err.context(format!("listener '{}' failed to stop", listener.name()));
				let message = format!("{err:#}");
				error!(parent: &span, error = %message, "lifecycle listener failed");
				failure.get_or_insert(err);
			}
		}

		if let Some(source) = failure {
			self.set_state(ContextState::Failed);
			return Err(LifecycleError::Teardown { generation, source });
		}

		self.set_state(ContextState::Stopped);
		info!(
			parent: &span,
			admitted = boundary.admitted_entries().len(),
			host_fallbacks = boundary.provenance().len(),
			"web app stopped"
		);
		Ok(generation)
	}
}

impl std::fmt::Debug for ReloadableContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReloadableContext")
			.field("root", &self.config.root)
			.field("state", &self.state())
			.field("generation", &self.generation())
			.finish()
	}
}

#[cfg(test)]
mod tests;
