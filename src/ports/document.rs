//! Document port: Trait for turning a report layout into a file format.

use crate::domain::ReportLayout;

/// Errors raised while encoding a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Encodes a laid-out report into downloadable bytes.
pub trait DocumentEncoder: Send + Sync {
    /// Encode every page of `layout`.
    ///
    /// Identical layouts must produce identical bytes.
    ///
    /// # Errors
    /// Returns `DocumentError` if the layout cannot be serialized.
    fn encode(&self, layout: &ReportLayout) -> Result<Vec<u8>, DocumentError>;
}
