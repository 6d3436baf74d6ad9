mod module;
mod registered_module;
mod store;

pub use module::{Module, ModuleDescriptor, ModuleFactory};
pub use registered_module::RegisteredModule;
pub use store::ModuleRegistry;
