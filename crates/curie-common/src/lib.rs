//! curie-common: Shared types and errors used across all Curie crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{Modifier, ModifierSet, Phenotype};
pub use error::{CurieError, Result};
