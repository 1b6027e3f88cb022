pub mod predicate;
pub mod stage;

// Re-export key types for easier access from other sluice modules
pub use predicate::{CanProceed, Predicate};
pub use stage::{Stage, StageOutput};
