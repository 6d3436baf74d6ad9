mod artifact;
mod location;

pub use artifact::Artifact;
pub use location::Location;
