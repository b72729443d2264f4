//! curie-web: HTTP API for the Curie HFpEF pathway service.
//! Exposes:
//!   - pathway generation for a patient modifier set
//!   - phenotype classification on its own
//!   - guideline metadata, trials, guidelines and citations

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
