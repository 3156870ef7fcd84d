//! Exit code constants for the routedesk CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable config or scenario)
//! - 2: Validation failure (empty fields, bad filter, illegal transition)
//! - 3: Unknown issue or agent
//! - 4: Assignment conflict (busy agent, missing binding)
//! - 5: No agents available to take an issue

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or serialization failure.
pub const USER_ERROR: i32 = 1;

/// Validation failure: malformed input or illegal state transition.
pub const VALIDATION_FAILURE: i32 = 2;

/// Lookup failure: unknown issue or agent identifier.
pub const NOT_FOUND: i32 = 3;

/// Assignment conflict: double assignment or resolution without a live binding.
pub const ASSIGNMENT_CONFLICT: i32 = 4;

/// No agent could be selected for an issue.
pub const NO_AGENTS: i32 = 5;
