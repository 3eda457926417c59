//! Error types for the evolutionary engine.
//!
//! All failures surface to the caller of [`Engine::run`](crate::Engine::run);
//! there is no internal recovery path. A fitness function is assumed pure and
//! infallible — a panic inside it propagates unchanged.

use thiserror::Error;

/// Errors produced by configuration validation and invariant checks.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A parameter is out of range or inconsistent. Raised before any
    /// generation runs.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operator produced a gene sequence that is not a valid permutation.
    /// Indicates an operator implementation bug; fatal to the run.
    #[error("invariant violation in {context}: {detail}")]
    InvariantViolation {
        /// Where the invalid sequence was produced (strategy, parents).
        context: String,
        /// What was wrong with the sequence.
        detail: String,
    },
}

impl EngineError {
    /// Replaces the context of an [`InvariantViolation`](Self::InvariantViolation),
    /// leaving other variants untouched.
    pub(crate) fn with_context(self, context: String) -> Self {
        match self {
            EngineError::InvariantViolation { detail, .. } => {
                EngineError::InvariantViolation { context, detail }
            }
            other => other,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
