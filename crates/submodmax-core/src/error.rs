//! Error types for submodmax

use thiserror::Error;

/// Main error type for submodmax operations.
///
/// Every variant is fatal to the `optimize()` call that produced it. They
/// signal a broken precondition (a non-conforming objective function or
/// invalid parameters), never a transient condition worth retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmodError {
    /// No singleton subset has a defined objective value.
    ///
    /// Raised when the ground set is empty or every singleton evaluates to NaN.
    #[error("No feasible initial singleton: the ground set is empty or no singleton has a defined value")]
    NoFeasibleSingleton,

    /// An algorithm invariant did not hold at the end of a run.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid optimizer parameters.
    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    /// An incremental evaluation needed the previous function info but got none.
    #[error("Missing previous function info for an incremental evaluation")]
    MissingPreviousState,

    /// The current set of a [`SetDeltaInfo`](crate::SetDeltaInfo) was set twice.
    #[error("Current set was already materialized")]
    CurrentSetAlreadySet,

    /// The objective function rejected its input.
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

/// Result type alias for submodmax operations
pub type Result<T> = std::result::Result<T, SubmodError>;
