use std::any::Any;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use strata::source_api::{Artifact, Module, ModuleDescriptor, ModuleFactory, ModuleRegistry};
use strata::{
	Classification, ContextInfo, Generation, ProvenanceRecord, ReloadableContext, ResourceName,
};
use tracing::info;

use crate::settings::ResolvedConfig;

/// One lookup as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Lookup {
	pub(crate) name: String,
	pub(crate) classification: Option<Classification>,
	#[serde(flatten)]
	pub(crate) outcome: LookupOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum LookupOutcome {
	Found { location: String, bytes: usize },
	NotFound,
	Invalid { error: String },
}

/// Lookups answered by one generation.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Pass {
	pub(crate) generation: Generation,
	pub(crate) lookups: Vec<Lookup>,
	pub(crate) modules: Vec<String>,
	pub(crate) provenance: Vec<ProvenanceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Report {
	pub(crate) context: ContextInfo,
	pub(crate) passes: Vec<Pass>,
}

/// Starts a context from resolved settings and resolves the requested names.
pub(crate) struct ResolveWorkflow {
	context: ReloadableContext,
	names: Vec<String>,
	reload: bool,
}

impl ResolveWorkflow {
	pub(crate) fn from_config(
		config: &ResolvedConfig,
		names: Vec<String>,
		reload: bool,
	) -> Result<Self> {
		let modules = preload_registry(&config.startup_modules)?;
		let context = ReloadableContext::builder(config.context_config())
			.modules(modules)
			.build()
			.context("failed to open the host classpath")?;
		Ok(Self {
			context,
			names,
			reload,
		})
	}

	pub(crate) fn run(self) -> Result<Report> {
		self.context.start()?;
		let mut passes = vec![self.pass()?];

		if self.reload {
			self.context.reload()?;
			passes.push(self.pass()?);
		}

		let context = self.context.info();
		let generation = self.context.stop()?;
		info!(%generation, "web app stopped");

		Ok(Report { context, passes })
	}

	fn pass(&self) -> Result<Pass> {
		let boundary = self
			.context
			.boundary()
			.context("web app stopped while resolving")?;

		let lookups = self
			.names
			.iter()
			.map(|raw| match ResourceName::parse(raw) {
				Ok(name) => Lookup {
					name: name.to_string(),
					classification: Some(boundary.classify(&name)),
					outcome: match boundary.resolve(&name) {
						Some(artifact) => LookupOutcome::Found {
							location: artifact.location().to_string(),
							bytes: artifact.len(),
						},
						None => LookupOutcome::NotFound,
					},
				},
				Err(err) => Lookup {
					name: raw.clone(),
					classification: None,
					outcome: LookupOutcome::Invalid {
						error: err.to_string(),
					},
				},
			})
			.collect();

		let modules = self
			.context
			.config()
			.startup_modules
			.iter()
			.filter(|name| {
				ResourceName::class(name)
					.ok()
					.is_some_and(|name| self.context.define(&name).is_ok())
			})
			.cloned()
			.collect();

		Ok(Pass {
			generation: boundary.generation(),
			lookups,
			modules,
			provenance: boundary.provenance().records(),
		})
	}
}

/// Module that pins a class's bytes for the lifetime of a generation.
struct Preloaded {
	descriptor: &'static ModuleDescriptor,
	_artifact: Arc<[u8]>,
}

impl Module for Preloaded {
	fn descriptor(&self) -> &'static ModuleDescriptor {
		self.descriptor
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

struct PreloadFactory {
	descriptor: &'static ModuleDescriptor,
}

impl ModuleFactory for PreloadFactory {
	fn descriptor(&self) -> &'static ModuleDescriptor {
		self.descriptor
	}

	fn build(&self, artifact: &Artifact) -> Result<Box<dyn Module>> {
		Ok(Box::new(Preloaded {
			descriptor: self.descriptor,
			_artifact: artifact.shared_bytes(),
		}))
	}
}

/// The binary has no compiled-in modules, so every startup class is preloaded.
fn preload_registry(names: &[String]) -> Result<ModuleRegistry> {
	let mut registry = ModuleRegistry::new();
	for name in names {
		if registry.contains(name) {
			continue;
		}
		let descriptor: &'static ModuleDescriptor = Box::leak(Box::new(ModuleDescriptor {
			id: Box::leak(name.clone().into_boxed_str()),
			summary: "preloaded on start",
		}));
		registry.register(PreloadFactory { descriptor })?;
	}
	Ok(registry)
}
