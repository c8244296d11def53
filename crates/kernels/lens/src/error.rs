//! Analysis error types.

use thiserror::Error;

/// Errors reported by the analysis passes.
///
/// Recoverable per-sample conditions (points outside the domain, vanishing
/// fields, degenerate eigenvalues) never surface here; they only shrink the
/// result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration validation failure.
    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),
    /// The field is not defined on a grid a sampling lattice can be derived from.
    #[error("Domain mismatch: {0}")]
    DomainMismatch(String),
}

impl AnalysisError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
