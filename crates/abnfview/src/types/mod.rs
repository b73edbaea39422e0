mod diagram;
mod metadata;
mod provenance;

pub use diagram::DiagramNode;
pub use metadata::DependencyMetadata;
pub use provenance::Provenance;
