//! Tests for scenario parsing and the runner.

use super::scenario::{Scenario, Step};
use super::*;
use routedesk::issue::{IssueCategory, IssueStatus};
use std::fs;
use tempfile::TempDir;

fn run(yaml: &str, check: bool) -> (run::RunSummary, String) {
    let engine = ResolutionEngine::new(&EngineConfig::default()).unwrap();
    let scenario = Scenario::from_yaml(yaml).unwrap();
    let mut out = Vec::new();
    let summary = run_scenario(&engine, &scenario, check, &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_every_step_kind() {
    let scenario = Scenario::from_yaml(
        r#"
agents:
  - name: Agent 1
    contact: agent1@test.com
    expertise: [payment, mutual_fund]
steps:
  - echo: hello
  - create:
      txn_ref: T1
      category: gold
      subject: Gold not credited
      description: Bought 1g, balance unchanged
      contact: user@test.com
  - add_agent:
      name: Agent 2
      contact: agent2@test.com
      expertise: [gold]
  - assign: IT1
  - update: { issue: IT1, note: checking vault, status: in_progress }
  - resolve: { issue: IT1, resolution: credited }
  - list: { email: user@test.com }
  - history
  - roster
"#,
    )
    .unwrap();

    assert_eq!(scenario.agents.len(), 1);
    assert_eq!(
        scenario.agents[0].expertise,
        vec![IssueCategory::Payment, IssueCategory::MutualFund]
    );
    let names: Vec<&str> = scenario.steps.iter().map(Step::name).collect();
    assert_eq!(
        names,
        vec![
            "echo", "create", "add_agent", "assign", "update", "resolve", "list", "history",
            "roster"
        ]
    );
    match &scenario.steps[4] {
        Step::Update { status, .. } => assert_eq!(*status, IssueStatus::InProgress),
        other => panic!("Expected Update step, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_scenario() {
    let scenario = Scenario::from_yaml("").unwrap();
    assert!(scenario.agents.is_empty());
    assert!(scenario.steps.is_empty());
}

#[test]
fn test_parse_unknown_step_fails() {
    let err = Scenario::from_yaml("steps:\n  - escalate: IT1\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse scenario YAML"));
}

#[test]
fn test_load_scenario_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("desk.yaml");
    fs::write(&path, "steps:\n  - history\n").unwrap();

    let scenario = Scenario::load(&path).unwrap();
    assert_eq!(scenario.steps.len(), 1);

    let err = Scenario::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read scenario file"));
}

#[test]
fn test_run_reports_failures_and_continues() {
    let (summary, output) = run(
        r#"
steps:
  - create:
      txn_ref: T1
      category: payment
      subject: Payment Failed
      description: Money debited
      contact: user@test.com
  - assign: IT1
  - add_agent:
      name: Agent 1
      contact: agent1@test.com
      expertise: [payment]
  - assign: IT1
  - resolve: { issue: IT1, resolution: refunded }
  - resolve: { issue: IT1, resolution: refunded again }
  - history
"#,
        true,
    );

    assert_eq!(summary.steps, 7);
    assert_eq!(summary.failed, 2);
    assert!(output.contains("Issue IT1 created against transaction T1"));
    assert!(output.contains("Error: assign failed: no agents available to take issue IT1"));
    assert!(output.contains("Issue IT1 assigned to Agent A1"));
    assert!(output.contains("Agent A1 is idle"));
    assert!(output.contains(
        "Error: resolve failed: issue IT1 is not currently assigned to any agent"
    ));
    assert!(output.contains("A1 -> [IT1]"));
    assert!(output.trim_end().ends_with("7 steps, 2 failed"));
}

#[test]
fn test_run_bad_issue_id_is_a_step_failure() {
    let (summary, output) = run("steps:\n  - assign: 'T 1'\n", false);
    assert_eq!(summary.failed, 1);
    assert!(output.contains("Error: assign failed"));
}

#[test]
fn test_run_list_with_bad_filter_key() {
    let (summary, output) = run("steps:\n  - list: { colour: red }\n", false);
    assert_eq!(summary.failed, 1);
    assert!(output.contains("unknown issue filter key 'colour'"));
}

#[test]
fn test_demo_scenario_runs() {
    let (summary, output) = run(DEMO_SCENARIO, true);

    // Only the resolve of the still-queued IT8 fails.
    assert_eq!(summary.failed, 1);
    assert!(output.contains("Error: resolve failed: issue IT8 is not currently assigned"));

    assert!(output.contains("Issue IT1 assigned to Agent A1"));
    assert!(output.contains("Issue IT2 assigned to Agent A2"));
    assert!(output.contains("Issue IT5 added to waitlist of Agent A1"));
    assert!(output.contains("Issue IT9 added to waitlist of Agent A1"));
    assert!(output.contains("Issue IT6 promoted for Agent A2"));
    assert!(output.contains("Issue IT10 assigned to Agent A2"));
    assert!(output.contains("A2 -> [IT2, IT6]"));
}

#[test]
fn test_load_config_defaults_and_file() {
    assert_eq!(load_config(None).unwrap(), EngineConfig::default());

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("engine.yaml");
    fs::write(&path, "assignment_strategy: round_robin\n").unwrap();
    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(
        config.assignment_strategy,
        routedesk::config::StrategyKind::RoundRobin
    );

    fs::write(&path, "journal_capacity: 0\n").unwrap();
    assert!(load_config(Some(path.as_path())).is_err());
}
