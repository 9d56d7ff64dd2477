//! Shared types for the Parky API: identifiers, domain errors and the
//! per-request model-state accumulator.

pub mod error;
pub mod model_state;
pub mod types;
