pub mod met_aromatic;
pub mod structs;

// Re-exports
pub use met_aromatic::detect_interactions;
pub use structs::Interaction;
