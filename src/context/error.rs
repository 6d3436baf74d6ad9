use std::path::PathBuf;

use strata_source_api::SourceError;
use thiserror::Error;

use super::ContextState;
use crate::boundary::Generation;

#[derive(Debug, Error)]
pub enum LifecycleError {
	#[error("cannot {operation} a web app that is {state}")]
	InvalidState {
		operation: &'static str,
		state: ContextState,
	},

	#[error("host classpath entry {path} could not be opened")]
	HostClasspath {
		path: PathBuf,
		#[source]
		source: SourceError,
	},

	#[error("web app generation {generation} failed to start")]
	Startup {
		generation: Generation,
		#[source]
		source: anyhow::Error,
	},

	#[error("web app generation {generation} failed to stop cleanly")]
	Teardown {
		generation: Generation,
		#[source]
		source: anyhow::Error,
	},
}
