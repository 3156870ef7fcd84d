//! Agent registry with per-agent locking.

use super::{Agent, validate_registration};
use crate::error::{DeskError, Result};
use crate::ids::{AgentId, IssueId};
use crate::issue::IssueCategory;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, RwLock};

/// Holds agent records keyed by id.
///
/// Each record sits behind its own `Mutex`, so work on different agents never
/// contends. Adding an agent takes the registry-wide write lock.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: RwLock<BTreeMap<AgentId, Arc<Mutex<Agent>>>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent and return its id.
    ///
    /// Ids are sequential (`A1`, `A2`, ...). Nothing is allocated when
    /// validation fails.
    pub fn register<I>(&self, name: &str, contact: &str, expertise: I) -> Result<AgentId>
    where
        I: IntoIterator<Item = IssueCategory>,
    {
        let expertise: BTreeSet<IssueCategory> = expertise.into_iter().collect();
        validate_registration(name, contact, &expertise)?;

        let mut agents = self.agents.write().unwrap_or_else(|p| p.into_inner());
        let sequence = u32::try_from(agents.len() + 1)
            .map_err(|_| DeskError::UserError("agent id space exhausted".to_string()))?;
        let id = AgentId::from_sequence(sequence);
        let agent = Agent::new(id.clone(), name, contact, expertise)?;
        agents.insert(id.clone(), Arc::new(Mutex::new(agent)));
        Ok(id)
    }

    /// Snapshot of an agent record.
    pub fn fetch(&self, id: &AgentId) -> Result<Agent> {
        self.with_agent(id, |agent| Ok(agent.clone()))
    }

    /// Make `issue` the agent's active assignment.
    pub fn mark_assigned(&self, id: &AgentId, issue: IssueId) -> Result<()> {
        self.with_agent(id, |agent| agent.assign(issue))
    }

    /// Queue `issue` behind the agent's active work; returns the new load.
    pub fn enqueue(&self, id: &AgentId, issue: IssueId) -> Result<usize> {
        self.with_agent(id, |agent| Ok(agent.enqueue(issue)))
    }

    /// Resolve the agent's active issue, promoting the queue head.
    pub fn mark_resolved(&self, id: &AgentId, resolution: &str) -> Result<Option<IssueId>> {
        self.with_agent(id, |agent| agent.resolve(resolution))
    }

    /// Resolved issue ids for one agent.
    pub fn history(&self, id: &AgentId) -> Result<Vec<IssueId>> {
        self.with_agent(id, |agent| Ok(agent.resolved_issue_ids()))
    }

    /// Resolved issue ids for every agent.
    pub fn work_history(&self) -> BTreeMap<AgentId, Vec<IssueId>> {
        self.handles()
            .into_iter()
            .map(|(id, handle)| {
                let agent = handle.lock().unwrap_or_else(|p| p.into_inner());
                (id, agent.resolved_issue_ids())
            })
            .collect()
    }

    /// Snapshots of every agent, ordered by id.
    pub fn all(&self) -> Vec<Agent> {
        self.handles()
            .into_iter()
            .map(|(_, handle)| handle.lock().unwrap_or_else(|p| p.into_inner()).clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` with the agent's lock held.
    fn with_agent<R>(&self, id: &AgentId, f: impl FnOnce(&mut Agent) -> Result<R>) -> Result<R> {
        let handle = {
            let agents = self.agents.read().unwrap_or_else(|p| p.into_inner());
            agents
                .get(id)
                .cloned()
                .ok_or_else(|| DeskError::NotFound(format!("agent {}", id)))?
        };
        let mut agent = handle.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut agent)
    }

    /// Clone out the handles so per-agent locks are taken without holding
    /// the registry lock.
    fn handles(&self) -> Vec<(AgentId, Arc<Mutex<Agent>>)> {
        self.agents
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .map(|(id, handle)| (id.clone(), Arc::clone(handle)))
            .collect()
    }
}
