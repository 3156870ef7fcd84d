//! Tests for config functionality.

use crate::config::{EngineConfig, StrategyKind};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = EngineConfig::default();

    assert_eq!(config.assignment_strategy, StrategyKind::FreeAgentFirst);
    assert!(config.cross_skill_fallback);
    assert!(config.event_log.is_none());
    assert_eq!(config.journal_capacity, 10_000);
}

#[test]
fn test_parse_empty_yaml() {
    let config = EngineConfig::from_yaml("").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
assignment_strategy: round_robin
"#;
    let config = EngineConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.assignment_strategy, StrategyKind::RoundRobin);
    // Unspecified values should use defaults
    assert!(config.cross_skill_fallback);
    assert_eq!(config.journal_capacity, 10_000);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
assignment_strategy: free_agent_first
cross_skill_fallback: false
event_log: /tmp/routedesk/events.ndjson
journal_capacity: 50
"#;
    let config = EngineConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.assignment_strategy, StrategyKind::FreeAgentFirst);
    assert!(!config.cross_skill_fallback);
    assert_eq!(
        config.event_log,
        Some(PathBuf::from("/tmp/routedesk/events.ndjson"))
    );
    assert_eq!(config.journal_capacity, 50);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
assignment_strategy: round_robin
sla_minutes: 30
"#;
    let config = EngineConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.assignment_strategy, StrategyKind::RoundRobin);
}

#[test]
fn test_invalid_strategy_fails() {
    let result = EngineConfig::from_yaml("assignment_strategy: skill_weighted");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("failed to parse config YAML")
    );
}

#[test]
fn test_validate_zero_journal_capacity() {
    let result = EngineConfig::from_yaml("journal_capacity: 0");

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("journal_capacity"));
}

#[test]
fn test_validate_empty_event_log_path() {
    let config = EngineConfig {
        event_log: Some(PathBuf::new()),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_yaml_round_trip() {
    let config = EngineConfig {
        assignment_strategy: StrategyKind::RoundRobin,
        cross_skill_fallback: false,
        event_log: Some(PathBuf::from("events.ndjson")),
        journal_capacity: 7,
    };
    let yaml = config.to_yaml().unwrap();
    assert_eq!(EngineConfig::from_yaml(&yaml).unwrap(), config);
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("routedesk.yaml");
    std::fs::write(&path, "cross_skill_fallback: false\n").unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert!(!config.cross_skill_fallback);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = EngineConfig::load(temp_dir.path().join("missing.yaml"));

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("failed to read config file")
    );
}
