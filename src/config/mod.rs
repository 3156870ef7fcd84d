//! Engine configuration.
//!
//! Configuration is a small YAML document. Every field has a default, so an
//! empty file (or no file) yields a working engine; unknown fields are ignored
//! for forward compatibility.
//!
//! ```yaml
//! assignment_strategy: free_agent_first
//! cross_skill_fallback: true
//! event_log: /var/log/routedesk/events.ndjson
//! journal_capacity: 10000
//! ```

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::EngineConfig;
pub use types::StrategyKind;
