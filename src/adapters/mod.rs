//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `model`: JSON model exports (serde_json, sha2 fingerprints)
//! - `pdf`: lopdf for report documents
//! - `fs`: local filesystem report storage

pub mod fs;
pub mod model;
pub mod pdf;

pub use fs::{FsReportStore, ReportStoreError};
pub use model::JsonModelStore;
pub use pdf::PdfEncoder;
