//! Configuration enums and defaults.

use serde::{Deserialize, Serialize};

/// Which assignment strategy the engine is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Idle specialist, then any idle agent, then least-loaded busy agent.
    #[default]
    FreeAgentFirst,
    /// Like free-agent-first, but rotates through idle specialists.
    RoundRobin,
}

impl StrategyKind {
    /// Parse a strategy kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free_agent_first" => Some(Self::FreeAgentFirst),
            "round_robin" => Some(Self::RoundRobin),
            _ => None,
        }
    }
}

// Default value functions for serde
pub(crate) fn default_true() -> bool {
    true
}
pub(crate) fn default_journal_capacity() -> usize {
    10_000
}
