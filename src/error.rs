//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside of rule evaluation.
//! Vacation rule outcomes themselves are plain [`ValidationResult`] values;
//! they only become an error once a workflow decides to abort on them.
//!
//! [`ValidationResult`]: crate::models::ValidationResult

use thiserror::Error;

use crate::models::{ApprovalStatus, RuleViolation};

/// The main error type for the Leave Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The loaded policy thresholds are inconsistent.
    #[error("Invalid vacation policy: {message}")]
    InvalidPolicy {
        /// A description of the inconsistency.
        message: String,
    },

    /// A leave application was invalid or contained inconsistent data.
    #[error("Invalid leave field '{field}': {message}")]
    InvalidLeave {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A vacation request was rejected by the splitting rules.
    #[error("{message}")]
    VacationRuleViolation {
        /// Which rule rejected the request.
        violation: RuleViolation,
        /// The user-facing message, reported verbatim.
        message: String,
    },

    /// No leave with the given id exists.
    #[error("Leave not found: {id}")]
    LeaveNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The approval workflow does not allow the requested move.
    #[error("Leave '{id}' cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// The leave being decided.
        id: String,
        /// Its current approval state.
        from: ApprovalStatus,
        /// The state that was requested.
        to: ApprovalStatus,
    },

    /// The leave repository could not serve the request.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
