use std::sync::Arc;

use super::{ModuleDescriptor, ModuleFactory};

/// A factory stored in the [`ModuleRegistry`](super::ModuleRegistry).
#[derive(Clone)]
pub struct RegisteredModule {
    descriptor: &'static ModuleDescriptor,
    factory: Arc<dyn ModuleFactory>,
}

impl RegisteredModule {
    pub fn new<F>(factory: F) -> Self
    where
        F: ModuleFactory + 'static,
    {
        let descriptor = factory.descriptor();
        Self {
            descriptor,
            factory: Arc::new(factory),
        }
    }

    pub fn descriptor(&self) -> &'static ModuleDescriptor {
        self.descriptor
    }

    pub fn factory(&self) -> Arc<dyn ModuleFactory> {
        Arc::clone(&self.factory)
    }
}
