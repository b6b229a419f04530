//! Report store port: Trait for durable report artifacts.

use std::path::PathBuf;

/// Local storage for report artifacts.
///
/// One artifact per name; saving again overwrites it.
pub trait ReportStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write `bytes` under `name`, replacing any previous artifact.
    ///
    /// # Returns
    /// The location the artifact was written to.
    ///
    /// # Errors
    /// Returns error if the write fails.
    fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, Self::Error>;

    /// Read an artifact back, e.g. for download.
    ///
    /// # Errors
    /// Returns error if the artifact is missing or unreadable.
    fn load(&self, name: &str) -> Result<Vec<u8>, Self::Error>;

    /// Where `name` is (or would be) stored.
    fn location(&self, name: &str) -> PathBuf;
}
