use std::any::Any;

use crate::types::Artifact;

/// Static metadata describing a loadable module.
#[derive(Debug, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Dotted class name the module is defined from, e.g. `app.web.HelloServlet`.
    pub id: &'static str,
    /// One-line description shown in listings.
    pub summary: &'static str,
}

/// Builds a [`Module`] from the bytes an isolation boundary resolved for it.
///
/// Factories are registered explicitly under their class name. A boundary asks
/// the factory for a fresh instance once per generation, so a reload always
/// yields a new module built from re-read bytes.
pub trait ModuleFactory: Send + Sync {
    /// Static descriptor advertising module metadata.
    fn descriptor(&self) -> &'static ModuleDescriptor;

    /// Instantiate the module from its resolved artifact.
    fn build(&self, artifact: &Artifact) -> anyhow::Result<Box<dyn Module>>;
}

/// A module instance owned by a single isolation boundary generation.
pub trait Module: Send + Sync {
    fn descriptor(&self) -> &'static ModuleDescriptor;

    /// Escape hatch for callers that know the concrete type.
    fn as_any(&self) -> &dyn Any;
}
