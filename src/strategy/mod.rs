//! Assignment strategies.
//!
//! A strategy looks at an issue and the current roster and names the agent
//! that should take it. It only reads: moving agents between the index and
//! the heap is the engine's job once it commits the decision.
//!
//! # Selection Order (free agent first)
//!
//! 1. An idle agent with expertise in the issue's category
//! 2. Any idle agent (cross-skill overflow, can be disabled)
//! 3. The least-loaded busy agent, who will queue the issue
//! 4. Nobody: no agents are registered

mod round_robin;

pub use round_robin::RoundRobin;

use crate::config::{EngineConfig, StrategyKind};
use crate::ids::AgentId;
use crate::issue::Issue;
use crate::pool::{AvailabilityIndex, BusyHeap};

/// Whether the selected agent will take the issue now or queue it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Agent is idle; the issue becomes its active assignment.
    Idle,
    /// Agent is busy; the issue joins its pending queue.
    Busy,
}

/// A strategy's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub agent_id: AgentId,
    pub kind: SelectionKind,
}

impl Selection {
    pub fn idle(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            kind: SelectionKind::Idle,
        }
    }

    pub fn busy(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            kind: SelectionKind::Busy,
        }
    }
}

/// Policy for choosing the agent that receives an issue.
pub trait AssignmentStrategy: Send + Sync + std::fmt::Debug {
    /// Short name used in events and diagnostics.
    fn name(&self) -> &'static str;

    /// Pick an agent for `issue`, or `None` if no agent exists at all.
    fn select(&self, issue: &Issue, idle: &AvailabilityIndex, busy: &BusyHeap)
    -> Option<Selection>;
}

/// Build the strategy named by the configuration.
pub fn strategy_for(config: &EngineConfig) -> Box<dyn AssignmentStrategy> {
    match config.assignment_strategy {
        StrategyKind::FreeAgentFirst => Box::new(FreeAgentFirst::new(config.cross_skill_fallback)),
        StrategyKind::RoundRobin => Box::new(RoundRobin::new(config.cross_skill_fallback)),
    }
}

/// Idle specialist, then any idle agent, then the least-loaded busy agent.
#[derive(Debug, Clone)]
pub struct FreeAgentFirst {
    cross_skill_fallback: bool,
}

impl FreeAgentFirst {
    pub fn new(cross_skill_fallback: bool) -> Self {
        Self {
            cross_skill_fallback,
        }
    }
}

impl Default for FreeAgentFirst {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AssignmentStrategy for FreeAgentFirst {
    fn name(&self) -> &'static str {
        "free_agent_first"
    }

    fn select(
        &self,
        issue: &Issue,
        idle: &AvailabilityIndex,
        busy: &BusyHeap,
    ) -> Option<Selection> {
        if let Some(agent) = idle.pick_idle(issue.category) {
            return Some(Selection::idle(agent.clone()));
        }
        fallback(self.cross_skill_fallback, idle, busy)
    }
}

/// Steps 2-4, shared by every strategy.
pub(crate) fn fallback(
    cross_skill: bool,
    idle: &AvailabilityIndex,
    busy: &BusyHeap,
) -> Option<Selection> {
    if cross_skill && let Some(agent) = idle.pick_any_idle() {
        return Some(Selection::idle(agent.clone()));
    }
    if let Some((agent, _)) = busy.peek_least_loaded() {
        return Some(Selection::busy(agent.clone()));
    }
    // With overflow disabled, off-skill idle agents are used only when
    // nobody is busy.
    idle.pick_any_idle().map(|agent| Selection::idle(agent.clone()))
}
