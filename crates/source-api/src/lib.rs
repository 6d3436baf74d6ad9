pub mod error;
pub mod registry;
pub mod source;
pub mod types;

pub use error::{AdmissionError, ModuleRegistryError, SourceError};
pub use registry::{Module, ModuleDescriptor, ModuleFactory, ModuleRegistry, RegisteredModule};
pub use source::{ArchiveSource, DirectorySource, MemorySource, Source, SourceEntry, SourceSet};
pub use types::{Artifact, Location};
