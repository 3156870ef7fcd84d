//! Min-heap over busy agents keyed by pending-queue length.
//!
//! The heap owns a position map (`agent -> slot`) that is rewritten on every
//! swap, so an agent's key can be changed or the agent removed in O(log n)
//! without scanning.

use crate::ids::AgentId;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeapEntry {
    agent: AgentId,
    load: usize,
}

impl HeapEntry {
    // Ties on load fall back to agent id so runs are reproducible; callers
    // must not rely on which of two equally loaded agents comes first.
    fn precedes(&self, other: &HeapEntry) -> bool {
        match self.load.cmp(&other.load) {
            Ordering::Equal => self.agent < other.agent,
            ord => ord == Ordering::Less,
        }
    }
}

/// Busy agents ordered by ascending load.
#[derive(Debug, Clone, Default)]
pub struct BusyHeap {
    entries: Vec<HeapEntry>,
    positions: HashMap<AgentId, usize>,
}

impl BusyHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.positions.contains_key(agent)
    }

    /// Current slot of an agent in the backing array.
    pub fn position(&self, agent: &AgentId) -> Option<usize> {
        self.positions.get(agent).copied()
    }

    /// Load recorded for an agent.
    pub fn load_of(&self, agent: &AgentId) -> Option<usize> {
        self.position(agent).map(|pos| self.entries[pos].load)
    }

    /// Insert an agent, or refresh its load if already present.
    pub fn push(&mut self, agent: AgentId, load: usize) {
        if self.contains(&agent) {
            self.update(&agent, load);
            return;
        }
        let pos = self.entries.len();
        self.positions.insert(agent.clone(), pos);
        self.entries.push(HeapEntry { agent, load });
        self.sift_up(pos);
    }

    /// The least-loaded busy agent without removing it.
    pub fn peek_least_loaded(&self) -> Option<(&AgentId, usize)> {
        self.entries.first().map(|e| (&e.agent, e.load))
    }

    /// Remove and return the least-loaded busy agent.
    pub fn pop_least_loaded(&mut self) -> Option<(AgentId, usize)> {
        let root = self.entries.first()?.agent.clone();
        self.remove(&root).map(|load| (root, load))
    }

    /// Remove an agent; returns its last recorded load.
    pub fn remove(&mut self, agent: &AgentId) -> Option<usize> {
        let pos = self.positions.remove(agent)?;
        let last = self.entries.len() - 1;
        if pos != last {
            self.entries.swap(pos, last);
            self.positions.insert(self.entries[pos].agent.clone(), pos);
        }
        let removed = self.entries.pop()?;
        if pos < self.entries.len() {
            self.restore(pos);
        }
        Some(removed.load)
    }

    /// Change an agent's load in place. Returns false if the agent is absent.
    pub fn update(&mut self, agent: &AgentId, load: usize) -> bool {
        let Some(pos) = self.position(agent) else {
            return false;
        };
        self.entries[pos].load = load;
        self.restore(pos);
        true
    }

    /// `(agent, load)` pairs in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, usize)> {
        self.entries.iter().map(|e| (&e.agent, e.load))
    }

    /// Whether the heap property and the position map both hold.
    pub fn is_consistent(&self) -> bool {
        if self.positions.len() != self.entries.len() {
            return false;
        }
        self.entries.iter().enumerate().all(|(i, entry)| {
            let parent_ok = i == 0 || !entry.precedes(&self.entries[(i - 1) / 2]);
            parent_ok && self.positions.get(&entry.agent) == Some(&i)
        })
    }

    fn restore(&mut self, pos: usize) {
        let pos = self.sift_up(pos);
        self.sift_down(pos);
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.entries[pos].precedes(&self.entries[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < len && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                return;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].agent.clone(), a);
        self.positions.insert(self.entries[b].agent.clone(), b);
    }
}
