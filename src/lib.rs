//! Layered, reloadable resource resolution.
//!
//! An application tree is isolated from the host classpath by an
//! [`IsolationBoundary`]. Precedence rules decide which side may answer a
//! name; names the application lacks fall back to the host and the host-side
//! entry is admitted into the boundary for the rest of its generation. A
//! [`ReloadableContext`] swaps boundaries atomically on reload.

pub mod app_dirs;
pub mod boundary;
pub mod context;
pub mod logging;
pub mod name;
pub mod provenance;
pub mod rules;

pub use boundary::{BoundaryOptions, DefineError, DefinedModule, Generation, IsolationBoundary};
pub use context::{
	ContextBuilder, ContextConfig, ContextInfo, ContextState, LifecycleError, LifecycleListener,
	ReloadableContext,
};
pub use name::{NameError, NameKind, ResourceName};
pub use provenance::{ProvenanceLog, ProvenanceRecord};
pub use rules::{Classification, PrecedenceRules, Rule};

pub use strata_source_api as source_api;
