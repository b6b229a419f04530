//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

pub mod aligner;
mod prediction;
mod registry;
pub mod risk;

pub use aligner::align;
pub use prediction::{PredictionOutcome, PredictionService};
pub use registry::ModelRegistry;
pub use risk::classify;
