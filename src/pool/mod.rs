//! Idle/busy bookkeeping for assignment.
//!
//! Two structures track every registered agent:
//!
//! - [`AvailabilityIndex`]: idle agents, bucketed by expertise category
//! - [`BusyHeap`]: busy agents, ordered by pending-queue length
//!
//! [`Roster`] moves agents between them. An agent is in exactly one of the two
//! at any time: in every bucket for its expertise while idle, in the heap
//! while busy.

mod availability;
mod heap;

pub use availability::AvailabilityIndex;
pub use heap::BusyHeap;

use crate::agent::Agent;
use crate::error::{DeskError, Result};
use crate::ids::AgentId;
use crate::issue::IssueCategory;
use serde::Serialize;
use std::collections::BTreeMap;

/// The availability index and busy heap, kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    index: AvailabilityIndex,
    busy: BusyHeap,
}

/// Point-in-time view of the roster for display and assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSnapshot {
    /// Idle agent ids per category.
    pub idle: BTreeMap<IssueCategory, Vec<AgentId>>,
    /// Busy agent ids with their pending-queue length, least loaded first.
    pub busy: Vec<(AgentId, usize)>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &AvailabilityIndex {
        &self.index
    }

    pub fn busy(&self) -> &BusyHeap {
        &self.busy
    }

    /// Move an agent from the index into the heap.
    pub fn mark_busy(&mut self, agent: &Agent) {
        self.index.remove(&agent.id, &agent.expertise);
        self.busy.push(agent.id.clone(), agent.load());
    }

    /// Move an agent from the heap back into every expertise bucket.
    pub fn mark_idle(&mut self, agent: &Agent) {
        self.busy.remove(&agent.id);
        self.index.insert(&agent.id, &agent.expertise);
    }

    /// Re-key a busy agent after its pending queue changed.
    pub fn refresh_load(&mut self, agent: &AgentId, load: usize) -> bool {
        self.busy.update(agent, load)
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        let idle = self
            .index
            .buckets()
            .iter()
            .map(|(category, agents)| (*category, agents.iter().cloned().collect()))
            .collect();
        let mut busy: Vec<(AgentId, usize)> =
            self.busy.iter().map(|(id, load)| (id.clone(), load)).collect();
        busy.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        RosterSnapshot { idle, busy }
    }

    /// Check the roster against the agents' own state.
    ///
    /// For every agent: idle means present in each of its expertise buckets
    /// and absent from the heap; busy means absent from every bucket and
    /// present in the heap with its current load.
    pub fn verify(&self, agents: &[Agent]) -> Result<()> {
        if !self.busy.is_consistent() {
            return Err(DeskError::UserError(
                "invariant violated: busy heap order or positions are corrupt".to_string(),
            ));
        }
        for agent in agents {
            let in_heap = self.busy.contains(&agent.id);
            if agent.is_idle() {
                let missing: Vec<String> = agent
                    .expertise
                    .iter()
                    .filter(|c| !self.index.contains(&agent.id, **c))
                    .map(|c| c.to_string())
                    .collect();
                if !missing.is_empty() || in_heap {
                    return Err(DeskError::UserError(format!(
                        "invariant violated: idle agent {} missing from [{}], in heap: {}",
                        agent.id,
                        missing.join(", "),
                        in_heap
                    )));
                }
                if !agent.pending.is_empty() {
                    return Err(DeskError::UserError(format!(
                        "invariant violated: idle agent {} has {} pending issues",
                        agent.id,
                        agent.pending.len()
                    )));
                }
            } else {
                if self.index.is_indexed(&agent.id) || !in_heap {
                    return Err(DeskError::UserError(format!(
                        "invariant violated: busy agent {} indexed as idle or missing from heap",
                        agent.id
                    )));
                }
                if self.busy.load_of(&agent.id) != Some(agent.load()) {
                    return Err(DeskError::UserError(format!(
                        "invariant violated: heap load for {} is stale",
                        agent.id
                    )));
                }
            }
        }
        let known = agents.len();
        let tracked = self.busy.len()
            + agents
                .iter()
                .filter(|a| self.index.is_indexed(&a.id))
                .count();
        if tracked != known {
            return Err(DeskError::UserError(format!(
                "invariant violated: roster tracks {} agents, registry holds {}",
                tracked, known
            )));
        }
        Ok(())
    }
}
