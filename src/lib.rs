//! # Srini Health
//!
//! Disease risk prediction from pre-trained classifiers.
//!
//! This crate provides:
//! - A read-only registry of binary classifiers for seven diseases
//! - Per-disease input schemas that drive form rendering and feature assembly
//! - Risk bucketing with fixed thresholds and recommendations
//! - Paginated PDF reports
//! - Terminal UI for local, single-user use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (Disease, schemas, records, results, layout)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (JSON models, lopdf, filesystem)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

use std::path::PathBuf;

pub use domain::{Disease, PatientRecord, PredictionResult, RiskLevel};

/// Main error type for Srini Health
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("No trained models found; add at least one model file")]
    RegistryEmpty,

    #[error("No {kind} found for '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("Prediction for {disease} failed: {reason}")]
    Prediction { disease: Disease, reason: String },

    #[error("Could not write report to {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid patient record: {0}")]
    InvalidRecord(String),

    #[error("Report encoding failed: {0}")]
    Document(#[from] ports::DocumentError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HealthError {
    /// Wrap a model failure with the disease it occurred for.
    #[must_use]
    pub fn prediction(disease: Disease, err: impl std::fmt::Display) -> Self {
        Self::Prediction {
            disease,
            reason: err.to_string(),
        }
    }

    /// Whether the prediction feature as a whole must be disabled.
    #[must_use]
    pub fn is_fatal_to_prediction(&self) -> bool {
        matches!(self, Self::RegistryEmpty)
    }
}
