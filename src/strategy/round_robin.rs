//! Round-robin over matching idle agents.

use super::{AssignmentStrategy, Selection, fallback};
use crate::ids::AgentId;
use crate::issue::Issue;
use crate::pool::{AvailabilityIndex, BusyHeap};
use std::sync::Mutex;

/// Spreads work across idle specialists instead of always picking the same
/// one first.
///
/// The only state is the id of the last agent handed an issue; the next pick
/// is the first matching idle agent after it, wrapping around.
#[derive(Debug)]
pub struct RoundRobin {
    cross_skill_fallback: bool,
    last: Mutex<Option<AgentId>>,
}

impl RoundRobin {
    pub fn new(cross_skill_fallback: bool) -> Self {
        Self {
            cross_skill_fallback,
            last: Mutex::new(None),
        }
    }
}

impl AssignmentStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn select(
        &self,
        issue: &Issue,
        idle: &AvailabilityIndex,
        busy: &BusyHeap,
    ) -> Option<Selection> {
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());

        let candidates: Vec<&AgentId> = idle.idle_in(issue.category).collect();
        let next = match last.as_ref() {
            Some(prev) => candidates
                .iter()
                .find(|id| **id > prev)
                .or_else(|| candidates.first()),
            None => candidates.first(),
        };

        let selection = match next {
            Some(agent) => Some(Selection::idle((*agent).clone())),
            None => fallback(self.cross_skill_fallback, idle, busy),
        };
        if let Some(ref s) = selection {
            *last = Some(s.agent_id.clone());
        }
        selection
    }
}
