//! Event journal for routedesk.
//!
//! Every committed engine transition produces one [`Event`]. Events are kept
//! in a bounded in-memory journal and, when an event log path is configured,
//! appended to an NDJSON file (one JSON object per line).
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: What happened (issue_assigned, issue_resolved, etc.)
//! - `actor`: The process owner (e.g., `user@HOST`)
//! - `issue`: Optional issue id
//! - `agent`: Optional agent id
//! - `details`: Freeform object with action-specific details
//!
//! ```no_run
//! use routedesk::events::{Event, EventAction, append_event};
//! use serde_json::json;
//!
//! let event = Event::new(EventAction::AgentAdded)
//!     .with_agent("A1")
//!     .with_details(json!({"expertise": ["payment"]}));
//! append_event("events.ndjson", &event)?;
//! # Ok::<(), routedesk::error::DeskError>(())
//! ```

use crate::error::{DeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Agent registered and indexed as idle
    AgentAdded,
    /// Issue record created
    IssueCreated,
    /// Issue became an idle agent's active work
    IssueAssigned,
    /// Issue queued behind a busy agent
    IssueWaitlisted,
    /// Queued issue became the agent's active work
    IssuePromoted,
    /// Issue resolved and released from its agent
    IssueResolved,
    /// Issue status or note changed administratively
    IssueUpdated,
    /// Agent returned to the availability index
    AgentIdle,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::AgentAdded => write!(f, "agent_added"),
            EventAction::IssueCreated => write!(f, "issue_created"),
            EventAction::IssueAssigned => write!(f, "issue_assigned"),
            EventAction::IssueWaitlisted => write!(f, "issue_waitlisted"),
            EventAction::IssuePromoted => write!(f, "issue_promoted"),
            EventAction::IssueResolved => write!(f, "issue_resolved"),
            EventAction::IssueUpdated => write!(f, "issue_updated"),
            EventAction::AgentIdle => write!(f, "agent_idle"),
        }
    }
}

/// An event record for the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The process owner that performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Issue the event concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Agent the event concerns, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_identity(),
            issue: None,
            agent: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_issue(mut self, issue_id: impl ToString) -> Self {
        self.issue = Some(issue_id.to_string());
        self
    }

    pub fn with_agent(mut self, agent_id: impl ToString) -> Self {
        self.agent = Some(agent_id.to_string());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| DeskError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// `user@host` of the running process.
fn actor_identity() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event as one NDJSON line, creating the file and its parent
/// directory if needed.
pub fn append_event<P: AsRef<Path>>(path: P, event: &Event) -> Result<()> {
    let path = path.as_ref();
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            DeskError::UserError(format!(
                "failed to create event log directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            DeskError::UserError(format!(
                "failed to open event log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        DeskError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        DeskError::UserError(format!(
            "failed to sync event log '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Bounded in-memory journal with an optional NDJSON file behind it.
#[derive(Debug)]
pub struct EventLog {
    entries: Mutex<VecDeque<Event>>,
    capacity: usize,
    file: Option<PathBuf>,
}

impl EventLog {
    pub fn new(capacity: usize, file: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            file,
        }
    }

    /// Record an event.
    ///
    /// The transition it describes has already been committed, so a failed
    /// file append is reported as a warning and the event is still journaled
    /// in memory.
    pub fn record(&self, event: Event) {
        if let Some(path) = &self.file
            && let Err(e) = append_event(path, &event)
        {
            eprintln!("Warning: {}", e);
        }

        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// Journaled events, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
