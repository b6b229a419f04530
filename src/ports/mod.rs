//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the prediction pipeline and external systems (model files,
//! document formats, report storage).

mod classifier;
mod document;
mod report_store;

pub use classifier::{Classifier, LoadedModel, ModelSource};
pub use document::{DocumentEncoder, DocumentError};
pub use report_store::ReportStore;
