//! Support agents and their work queues.
//!
//! An agent is **idle** when it holds no assigned issue and **busy** when it
//! holds exactly one. Issues routed to a busy agent wait in its FIFO pending
//! queue and are promoted one at a time as the active issue is resolved.

use crate::error::{DeskError, Result};
use crate::ids::{AgentId, IssueId};
use crate::issue::IssueCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

mod registry;
#[cfg(test)]
mod tests;

pub use registry::AgentRegistry;

/// One finished piece of work in an agent's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWork {
    pub issue_id: IssueId,
    pub resolution: String,
    pub resolved_at: DateTime<Utc>,
}

/// An agent record with its current work state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub contact: String,
    /// Categories the agent is declared capable of. Never empty.
    pub expertise: BTreeSet<IssueCategory>,
    /// The issue the agent is actively working, if any.
    pub assigned: Option<IssueId>,
    /// Issues waiting behind the active one, oldest first.
    pub pending: VecDeque<IssueId>,
    /// Resolved issues in resolution order.
    pub resolved: Vec<ResolvedWork>,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create an idle agent. Name, contact, and expertise must be non-empty.
    pub fn new(
        id: AgentId,
        name: &str,
        contact: &str,
        expertise: BTreeSet<IssueCategory>,
    ) -> Result<Self> {
        validate_registration(name, contact, &expertise)?;
        Ok(Self {
            id,
            name: name.trim().to_string(),
            contact: contact.trim().to_string(),
            expertise,
            assigned: None,
            pending: VecDeque::new(),
            resolved: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn is_idle(&self) -> bool {
        self.assigned.is_none()
    }

    /// Pending queue length, the key the busy heap orders by.
    pub fn load(&self) -> usize {
        self.pending.len()
    }

    pub fn has_expertise(&self, category: IssueCategory) -> bool {
        self.expertise.contains(&category)
    }

    /// Make `issue` the active assignment.
    pub fn assign(&mut self, issue: IssueId) -> Result<()> {
        if self.assigned.is_some() {
            return Err(DeskError::AlreadyBusy(self.id.to_string()));
        }
        self.assigned = Some(issue);
        Ok(())
    }

    /// Append `issue` to the pending queue and return the new queue length.
    pub fn enqueue(&mut self, issue: IssueId) -> usize {
        self.pending.push_back(issue);
        self.pending.len()
    }

    /// Move the active issue into history and promote the queue head.
    ///
    /// Returns the promoted issue, or `None` when the agent is now idle.
    pub fn resolve(&mut self, resolution: &str) -> Result<Option<IssueId>> {
        let finished = self
            .assigned
            .take()
            .ok_or_else(|| DeskError::NothingAssigned(self.id.to_string()))?;
        self.resolved.push(ResolvedWork {
            issue_id: finished,
            resolution: resolution.to_string(),
            resolved_at: Utc::now(),
        });
        self.assigned = self.pending.pop_front();
        Ok(self.assigned.clone())
    }

    /// Ids of resolved issues in resolution order.
    pub fn resolved_issue_ids(&self) -> Vec<IssueId> {
        self.resolved.iter().map(|w| w.issue_id.clone()).collect()
    }
}

fn validate_registration(
    name: &str,
    contact: &str,
    expertise: &BTreeSet<IssueCategory>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DeskError::ValidationError(
            "agent name cannot be empty".to_string(),
        ));
    }
    if contact.trim().is_empty() {
        return Err(DeskError::ValidationError(
            "agent contact cannot be empty".to_string(),
        ));
    }
    if expertise.is_empty() {
        return Err(DeskError::ValidationError(
            "agent must have at least one expertise category".to_string(),
        ));
    }
    Ok(())
}
