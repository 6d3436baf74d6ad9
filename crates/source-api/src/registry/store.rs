use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ModuleRegistryError;

use super::{ModuleDescriptor, ModuleFactory, RegisteredModule};

/// Registry of module factories keyed by class name.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<&'static str, RegisteredModule>,
}

impl ModuleRegistry {
    /// Create a registry without any factories registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under its descriptor id.
    pub fn register<F>(&mut self, factory: F) -> Result<(), ModuleRegistryError>
    where
        F: ModuleFactory + 'static,
    {
        let module = RegisteredModule::new(factory);
        let id = module.descriptor().id;
        if self.modules.contains_key(id) {
            return Err(ModuleRegistryError::DuplicateId { id });
        }
        self.modules.insert(id, module);
        Ok(())
    }

    /// Lookup the factory registered for a class name.
    pub fn factory(&self, id: &str) -> Option<Arc<dyn ModuleFactory>> {
        self.modules.get(id).map(RegisteredModule::factory)
    }

    /// Remove the factory registered for the provided identifier.
    pub fn deregister(&mut self, id: &str) -> Option<RegisteredModule> {
        self.modules.remove(id)
    }

    /// Iterate over registered descriptors, sorted by id.
    pub fn descriptors(&self) -> Vec<&'static ModuleDescriptor> {
        let mut descriptors: Vec<_> = self
            .modules
            .values()
            .map(RegisteredModule::descriptor)
            .collect();
        descriptors.sort_by_key(|descriptor| descriptor.id);
        descriptors
    }

    pub fn contains(&self, id: &str) -> bool {
        self.modules.contains_key(id)
    }

    /// Return the number of registered factories.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when no factories have been registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
