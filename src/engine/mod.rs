//! The resolution engine: routes issues to agents and releases them again.
//!
//! # Assignment
//!
//! 1. Fetch the issue (must exist, must not be resolved or already routed)
//! 2. Ask the strategy for an agent against the current roster
//! 3. Idle pick: the issue becomes the agent's active work and the agent
//!    moves into the busy heap
//! 4. Busy pick: the issue joins the agent's pending queue and the agent's
//!    heap key is refreshed
//! 5. Bind issue -> agent in both cases
//!
//! # Resolution
//!
//! 1. Validate the resolution text and find the bound agent
//! 2. Only the agent's active issue can be resolved; a queued issue is not
//!    yet assigned
//! 3. Mark the issue resolved in the store
//! 4. Resolve on the agent, promoting the queue head (rebound to the same
//!    agent) or returning the agent to the availability index
//!
//! Every step of an assignment or resolution, including the store update and
//! the journal entries, runs inside one engine-wide critical section. Two
//! concurrent assignments can never both claim the same idle agent, and an
//! issue being resolved cannot be routed again. The journal is ordered the
//! same way the transitions were committed.


use crate::agent::{Agent, AgentRegistry};
use crate::config::EngineConfig;
use crate::error::{DeskError, Result};
use crate::events::{Event, EventAction, EventLog};
use crate::ids::{AgentId, IssueId};
use crate::issue::{
    InMemoryIssueStore, Issue, IssueCategory, IssueFilter, IssueStatus, IssueStore, NewIssue,
};
use crate::pool::{Roster, RosterSnapshot};
use crate::strategy::{AssignmentStrategy, SelectionKind, strategy_for};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Outcome of routing one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub issue_id: IssueId,
    pub agent_id: AgentId,
    /// True when the issue was queued behind the agent's active work.
    pub waitlisted: bool,
}

/// Outcome of resolving one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub issue_id: IssueId,
    pub agent_id: AgentId,
    /// Queued issue that became the agent's active work, if any.
    pub promoted: Option<IssueId>,
}

/// State that must change together with strategy decisions.
#[derive(Debug, Default)]
struct EngineState {
    roster: Roster,
    /// Agent currently responsible for each routed, unresolved issue.
    bindings: HashMap<IssueId, AgentId>,
}

/// Single entry point for issues, agents, and routing.
pub struct ResolutionEngine {
    issues: Box<dyn IssueStore>,
    agents: AgentRegistry,
    strategy: Box<dyn AssignmentStrategy>,
    state: Mutex<EngineState>,
    events: EventLog,
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("strategy", &self.strategy.name())
            .field("issues", &self.issues.len())
            .field("agents", &self.agents.len())
            .finish()
    }
}

impl ResolutionEngine {
    /// Build an engine with an in-memory issue store and the configured
    /// strategy.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Self::with_parts(config, Box::new(InMemoryIssueStore::new()), strategy_for(config))
    }

    /// Build an engine around a caller-supplied store and strategy.
    pub fn with_parts(
        config: &EngineConfig,
        issues: Box<dyn IssueStore>,
        strategy: Box<dyn AssignmentStrategy>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            issues,
            agents: AgentRegistry::new(),
            strategy,
            state: Mutex::new(EngineState::default()),
            events: EventLog::new(config.journal_capacity, config.event_log.clone()),
        })
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    // ========================================================================
    // Issues and agents
    // ========================================================================

    /// Create an issue. No agent is involved until it is assigned.
    pub fn create_issue(&self, fields: NewIssue) -> Result<IssueId> {
        let category = fields.category;
        let id = self.issues.create(fields)?;
        self.events.record(
            Event::new(EventAction::IssueCreated)
                .with_issue(&id)
                .with_details(json!({ "category": category })),
        );
        Ok(id)
    }

    /// Register an agent and make it available for every expertise category.
    pub fn add_agent<I>(&self, name: &str, contact: &str, expertise: I) -> Result<AgentId>
    where
        I: IntoIterator<Item = IssueCategory>,
    {
        let mut state = self.lock_state();
        let id = self.agents.register(name, contact, expertise)?;
        let agent = self.agents.fetch(&id)?;
        state.roster.mark_idle(&agent);

        self.events.record(
            Event::new(EventAction::AgentAdded)
                .with_agent(&id)
                .with_details(json!({
                    "name": agent.name,
                    "expertise": agent.expertise,
                })),
        );
        Ok(id)
    }

    pub fn get_issue(&self, id: &IssueId) -> Result<Issue> {
        self.issues.get(id)
    }

    /// Issues matching every populated field of `filter`.
    pub fn get_issues(&self, filter: &IssueFilter) -> Vec<Issue> {
        self.issues.filter(filter)
    }

    /// Snapshot of one agent record.
    pub fn agent(&self, id: &AgentId) -> Result<Agent> {
        self.agents.fetch(id)
    }

    /// Snapshots of every agent, ordered by id.
    pub fn agents(&self) -> Vec<Agent> {
        self.agents.all()
    }

    /// Agent currently responsible for `issue`, if it is routed.
    pub fn binding(&self, issue: &IssueId) -> Option<AgentId> {
        self.lock_state().bindings.get(issue).cloned()
    }

    /// Resolved issue ids per agent.
    pub fn view_work_history(&self) -> BTreeMap<AgentId, Vec<IssueId>> {
        self.agents.work_history()
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Route an issue to an agent chosen by the strategy.
    pub fn assign_issue(&self, issue_id: &IssueId) -> Result<Assignment> {
        let mut state = self.lock_state();
        let issue = self.issues.get(issue_id)?;
        if issue.is_resolved() {
            return Err(DeskError::ValidationError(format!(
                "issue {} is already resolved",
                issue_id
            )));
        }
        if let Some(agent) = state.bindings.get(issue_id) {
            return Err(DeskError::ValidationError(format!(
                "issue {} is already routed to agent {}",
                issue_id, agent
            )));
        }

        let selection = self
            .strategy
            .select(&issue, state.roster.index(), state.roster.busy())
            .ok_or_else(|| DeskError::NoAgentsAvailable(issue_id.to_string()))?;
        let agent_id = selection.agent_id;

        let waitlisted = match selection.kind {
            SelectionKind::Idle => {
                self.agents.mark_assigned(&agent_id, issue_id.clone())?;
                false
            }
            SelectionKind::Busy => {
                self.agents.enqueue(&agent_id, issue_id.clone())?;
                true
            }
        };
        let agent = self.agents.fetch(&agent_id)?;
        if waitlisted {
            state.roster.refresh_load(&agent_id, agent.load());
        } else {
            state.roster.mark_busy(&agent);
        }
        state.bindings.insert(issue_id.clone(), agent_id.clone());

        let action = if waitlisted {
            EventAction::IssueWaitlisted
        } else {
            EventAction::IssueAssigned
        };
        self.events.record(
            Event::new(action)
                .with_issue(issue_id)
                .with_agent(&agent_id)
                .with_details(json!({
                    "category": issue.category,
                    "strategy": self.strategy.name(),
                    "cross_skill": !agent.has_expertise(issue.category),
                    "queue_length": agent.load(),
                })),
        );
        drop(state);

        Ok(Assignment {
            issue_id: issue_id.clone(),
            agent_id,
            waitlisted,
        })
    }

    /// Resolve the active issue of its bound agent.
    ///
    /// Fails with `NotAssigned` when the issue has no binding (never routed,
    /// or already resolved) or is still waiting in the agent's queue.
    pub fn resolve_issue(&self, issue_id: &IssueId, resolution: &str) -> Result<Resolution> {
        self.issues.get(issue_id)?;
        if resolution.trim().is_empty() {
            return Err(DeskError::ValidationError(
                "resolution cannot be empty".to_string(),
            ));
        }

        let mut state = self.lock_state();
        let agent_id = state
            .bindings
            .get(issue_id)
            .cloned()
            .ok_or_else(|| DeskError::NotAssigned(issue_id.to_string()))?;

        let agent = self.agents.fetch(&agent_id)?;
        if agent.assigned.as_ref() != Some(issue_id) {
            return Err(DeskError::NotAssigned(issue_id.to_string()));
        }

        self.issues
            .set_status(issue_id, IssueStatus::Resolved, resolution)?;

        let promoted = self.agents.mark_resolved(&agent_id, resolution)?;
        let agent = self.agents.fetch(&agent_id)?;
        match &promoted {
            Some(next) => {
                state.roster.refresh_load(&agent_id, agent.load());
                state.bindings.insert(next.clone(), agent_id.clone());
            }
            None => state.roster.mark_idle(&agent),
        }
        state.bindings.remove(issue_id);

        self.events.record(
            Event::new(EventAction::IssueResolved)
                .with_issue(issue_id)
                .with_agent(&agent_id)
                .with_details(json!({ "resolution": resolution })),
        );
        match &promoted {
            Some(next) => self.events.record(
                Event::new(EventAction::IssuePromoted)
                    .with_issue(next)
                    .with_agent(&agent_id)
                    .with_details(json!({ "remaining": agent.load() })),
            ),
            None => self
                .events
                .record(Event::new(EventAction::AgentIdle).with_agent(&agent_id)),
        }
        drop(state);

        Ok(Resolution {
            issue_id: issue_id.clone(),
            agent_id,
            promoted,
        })
    }

    /// Annotate a routed issue or move it forward to `InProgress`.
    ///
    /// Resolving goes through [`resolve_issue`](Self::resolve_issue) so the
    /// agent is released.
    pub fn update_issue(&self, issue_id: &IssueId, note: &str, status: IssueStatus) -> Result<Issue> {
        self.issues.get(issue_id)?;
        if status == IssueStatus::Resolved {
            return Err(DeskError::ValidationError(format!(
                "issue {} must be resolved through its agent",
                issue_id
            )));
        }

        let state = self.lock_state();
        let agent_id = state
            .bindings
            .get(issue_id)
            .cloned()
            .ok_or_else(|| DeskError::NotAssigned(issue_id.to_string()))?;
        let updated = self.issues.set_status(issue_id, status, note)?;

        self.events.record(
            Event::new(EventAction::IssueUpdated)
                .with_issue(issue_id)
                .with_agent(&agent_id)
                .with_details(json!({ "status": status, "note": note })),
        );
        drop(state);
        Ok(updated)
    }

    // ========================================================================
    // Observation
    // ========================================================================

    pub fn snapshot(&self) -> RosterSnapshot {
        self.lock_state().roster.snapshot()
    }

    /// Verify that every agent is either idle and indexed or busy and in the
    /// heap, and that every binding points at an agent holding the issue.
    pub fn check_invariants(&self) -> Result<()> {
        let state = self.lock_state();
        let agents = self.agents.all();
        state.roster.verify(&agents)?;

        let by_id: HashMap<&AgentId, &Agent> = agents.iter().map(|a| (&a.id, a)).collect();
        for (issue, agent_id) in &state.bindings {
            let holds = by_id.get(agent_id).is_some_and(|agent| {
                agent.assigned.as_ref() == Some(issue) || agent.pending.contains(issue)
            });
            if !holds {
                return Err(DeskError::UserError(format!(
                    "invariant violated: issue {} bound to {} but not held by it",
                    issue, agent_id
                )));
            }
        }
        for agent in &agents {
            let held = agent.assigned.iter().chain(agent.pending.iter());
            for issue in held {
                if state.bindings.get(issue) != Some(&agent.id) {
                    return Err(DeskError::UserError(format!(
                        "invariant violated: agent {} holds {} without a binding",
                        agent.id, issue
                    )));
                }
            }
        }
        Ok(())
    }

    /// Journaled events, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.events()
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
