//! EngineConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // =========================================================================
    // Assignment settings
    // =========================================================================
    /// Strategy used to pick the agent for each issue.
    #[serde(default)]
    pub assignment_strategy: StrategyKind,

    /// Whether an idle agent outside the issue's category may take it before
    /// it is queued behind a busy agent.
    #[serde(default = "default_true")]
    pub cross_skill_fallback: bool,

    // =========================================================================
    // Event journal settings
    // =========================================================================
    /// NDJSON file every committed transition is appended to (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,

    /// Maximum events kept in memory; the oldest are dropped first.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assignment_strategy: StrategyKind::default(),
            cross_skill_fallback: default_true(),
            event_log: None,
            journal_capacity: default_journal_capacity(),
        }
    }
}
