//! Error types for routedesk.
//!
//! Uses thiserror for derive macros. Every failure the engine can produce is a
//! variant here; nothing is retried or recovered silently.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for routedesk operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// Configuration, IO, or serialization failure outside the engine core.
    #[error("{0}")]
    UserError(String),

    /// Malformed input: empty required field, empty expertise set,
    /// empty resolution text, illegal status transition.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Unknown issue or agent identifier.
    #[error("{0} not found")]
    NotFound(String),

    /// The agent already holds an assigned issue.
    #[error("agent {0} is already assigned an issue")]
    AlreadyBusy(String),

    /// The agent has no assigned issue to resolve.
    #[error("agent {0} has no assigned issue to resolve")]
    NothingAssigned(String),

    /// The issue has no live binding to an agent's active work.
    #[error("issue {0} is not currently assigned to any agent")]
    NotAssigned(String),

    /// No agent is registered or selectable for the issue.
    #[error("no agents available to take issue {0}")]
    NoAgentsAvailable(String),
}

impl DeskError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeskError::UserError(_) => exit_codes::USER_ERROR,
            DeskError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            DeskError::NotFound(_) => exit_codes::NOT_FOUND,
            DeskError::AlreadyBusy(_)
            | DeskError::NothingAssigned(_)
            | DeskError::NotAssigned(_) => exit_codes::ASSIGNMENT_CONFLICT,
            DeskError::NoAgentsAvailable(_) => exit_codes::NO_AGENTS,
        }
    }
}

/// Result type alias for routedesk operations.
pub type Result<T> = std::result::Result<T, DeskError>;
