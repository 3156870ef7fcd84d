//! Routedesk: in-memory support issue routing.
//!
//! Issues raised against transactions are routed to support agents by
//! expertise and current load. The [`engine::ResolutionEngine`] is the single
//! entry point; the other modules are its building blocks.
//!
//! ```no_run
//! use routedesk::config::EngineConfig;
//! use routedesk::engine::ResolutionEngine;
//! use routedesk::issue::{IssueCategory, NewIssue};
//!
//! let engine = ResolutionEngine::new(&EngineConfig::default())?;
//! engine.add_agent("Agent 1", "agent1@test.com", [IssueCategory::Payment])?;
//! let issue = engine.create_issue(NewIssue {
//!     txn_ref: "T1".into(),
//!     category: IssueCategory::Payment,
//!     subject: "Payment Failed".into(),
//!     description: "My payment failed but money is debited".into(),
//!     contact: "testUser1@test.com".into(),
//! })?;
//! let assignment = engine.assign_issue(&issue)?;
//! engine.resolve_issue(&issue, "Refund issued")?;
//! # let _ = assignment;
//! # Ok::<(), routedesk::error::DeskError>(())
//! ```

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod ids;
pub mod issue;
pub mod pool;
pub mod strategy;

pub use engine::{Assignment, Resolution, ResolutionEngine};
pub use error::{DeskError, Result};
