use std::fmt;
use std::sync::Arc;

use strata_source_api::{Artifact, Module, ModuleRegistry};
use thiserror::Error;
use tracing::debug;

use super::{Generation, IsolationBoundary};
use crate::name::ResourceName;

#[derive(Debug, Error)]
pub enum DefineError {
	#[error("no web app generation is running")]
	NotRunning,

	#[error("no module factory is registered for '{name}'")]
	Unregistered { name: String },

	#[error("module '{name}' could not be found in the web app or on the host classpath")]
	NotFound { name: String },

	#[error("failed to build module '{name}'")]
	Build {
		name: String,
		#[source]
		source: anyhow::Error,
	},
}

/// A module instance bound to the generation that defined it.
pub struct DefinedModule {
	generation: Generation,
	artifact: Arc<Artifact>,
	module: Box<dyn Module>,
}

impl DefinedModule {
	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn artifact(&self) -> &Arc<Artifact> {
		&self.artifact
	}

	pub fn module(&self) -> &dyn Module {
		self.module.as_ref()
	}

	pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
		self.module.as_any().downcast_ref::<T>()
	}
}

impl fmt::Debug for DefinedModule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DefinedModule")
			.field("id", &self.module.descriptor().id)
			.field("generation", &self.generation)
			.field("location", self.artifact.location())
			.finish()
	}
}

impl IsolationBoundary {
	/// Instantiate the module registered for `name` from this generation's bytes.
	///
	/// Instances are cached per generation; a reload always builds a new one.
	pub fn define(
		&self,
		name: &ResourceName,
		registry: &ModuleRegistry,
	) -> Result<Arc<DefinedModule>, DefineError> {
		if let Some(defined) = self.modules.read().get(name.dotted()) {
			return Ok(Arc::clone(defined));
		}

		let factory = registry
			.factory(name.dotted())
			.ok_or_else(|| DefineError::Unregistered {
				name: name.dotted().to_string(),
			})?;
		let artifact = self.resolve(name).ok_or_else(|| DefineError::NotFound {
			name: name.dotted().to_string(),
		})?;
		let module = factory
			.build(&artifact)
			.map_err(|source| DefineError::Build {
				name: name.dotted().to_string(),
				source,
			})?;

		debug!(
			parent: &self.span,
			name = %name,
			location = %artifact.location(),
			"defined module"
		);

		let defined = Arc::new(DefinedModule {
			generation: self.generation,
			artifact,
			module,
		});
		let mut modules = self.modules.write();
		let entry = modules.entry(name.dotted().to_string()).or_insert(defined);
		Ok(Arc::clone(entry))
	}
}
