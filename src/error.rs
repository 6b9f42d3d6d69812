//! Error types for the simulation core.

use thiserror::Error;

/// Errors surfaced by simulation construction, reset, and queries.
///
/// `step()` itself never fails: it performs well-defined arithmetic over
/// already-validated state, so every failure here is attributable to the
/// construction or query call that triggered it.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A caller-supplied value violates an input contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A query was made against a state with no bodies or no frames.
    #[error("empty state: {0}")]
    EmptyState(String),
}

impl SimulationError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Creates an empty state error.
    #[must_use]
    pub fn empty_state(reason: impl Into<String>) -> Self {
        Self::EmptyState(reason.into())
    }
}
