//! Expertise buckets of idle agents.

use crate::ids::AgentId;
use crate::issue::IssueCategory;
use std::collections::{BTreeMap, BTreeSet};

/// `category -> idle agents capable of it`.
///
/// Picks come from ordered sets, so they are repeatable in practice, but which
/// of several qualifying idle agents is returned is not part of the contract.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    buckets: BTreeMap<IssueCategory, BTreeSet<AgentId>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the agent to the bucket of every category it holds.
    pub fn insert(&mut self, agent: &AgentId, expertise: &BTreeSet<IssueCategory>) {
        for category in expertise {
            self.buckets
                .entry(*category)
                .or_default()
                .insert(agent.clone());
        }
    }

    /// Drop the agent from the bucket of every category it holds.
    pub fn remove(&mut self, agent: &AgentId, expertise: &BTreeSet<IssueCategory>) {
        for category in expertise {
            if let Some(bucket) = self.buckets.get_mut(category) {
                bucket.remove(agent);
                if bucket.is_empty() {
                    self.buckets.remove(category);
                }
            }
        }
    }

    /// Some idle agent with expertise in `category`.
    pub fn pick_idle(&self, category: IssueCategory) -> Option<&AgentId> {
        self.buckets.get(&category).and_then(|b| b.first())
    }

    /// Some idle agent from any non-empty bucket.
    pub fn pick_any_idle(&self) -> Option<&AgentId> {
        self.buckets.values().find_map(|b| b.first())
    }

    /// Idle agents capable of `category`, ordered by id.
    pub fn idle_in(&self, category: IssueCategory) -> impl Iterator<Item = &AgentId> {
        self.buckets.get(&category).into_iter().flatten()
    }

    pub fn contains(&self, agent: &AgentId, category: IssueCategory) -> bool {
        self.buckets
            .get(&category)
            .is_some_and(|b| b.contains(agent))
    }

    /// Whether the agent appears in any bucket.
    pub fn is_indexed(&self, agent: &AgentId) -> bool {
        self.buckets.values().any(|b| b.contains(agent))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Non-empty buckets.
    pub fn buckets(&self) -> &BTreeMap<IssueCategory, BTreeSet<AgentId>> {
        &self.buckets
    }
}
