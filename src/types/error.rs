//! Error types for mirra

use std::path::PathBuf;
use thiserror::Error;

/// Error types for mirra operations
#[derive(Debug, Error)]
pub enum MirraError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source root missing at pass start - the pass aborts without mutating
    #[error("Source directory does not exist: {path}")]
    SourceMissing { path: PathBuf },
}

impl MirraError {
    /// Check if this error aborts a pass before any mutation
    ///
    /// Fatal errors stop the current pass; per-entry copy/delete failures
    /// never surface here - they are reported as events and the pass
    /// continues.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MirraError::SourceMissing { .. } | MirraError::Config(_)
        )
    }

    /// Check if this error is the missing-source-root condition
    pub fn is_source_missing(&self) -> bool {
        matches!(self, MirraError::SourceMissing { .. })
    }
}
