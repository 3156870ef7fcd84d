//! Scenario runner.
//!
//! Steps run in order against one engine. A failing step is reported and the
//! run moves on to the next step; only an invariant violation under `--check`
//! or an unwritable output stops the run.

use super::scenario::{Scenario, Step};
use routedesk::engine::ResolutionEngine;
use routedesk::error::{DeskError, Result};
use routedesk::ids::IssueId;
use routedesk::issue::IssueFilter;
use std::io::Write;

/// Step counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub failed: usize,
}

/// Run `scenario` against `engine`, writing progress to `out`.
pub fn run_scenario(
    engine: &ResolutionEngine,
    scenario: &Scenario,
    check: bool,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    let registrations = scenario.agents.iter().cloned().map(Step::AddAgent);
    let steps: Vec<Step> = registrations.chain(scenario.steps.iter().cloned()).collect();

    for step in &steps {
        summary.steps += 1;
        let lines = match run_step(engine, step) {
            Ok(lines) => lines,
            Err(e) => {
                summary.failed += 1;
                vec![format!("Error: {} failed: {}", step.name(), e)]
            }
        };
        write_lines(out, &lines)?;

        if check {
            engine.check_invariants()?;
        }
    }

    write_lines(
        out,
        &[format!("\n{} steps, {} failed", summary.steps, summary.failed)],
    )?;
    Ok(summary)
}

/// Apply one step and render what it did.
fn run_step(engine: &ResolutionEngine, step: &Step) -> Result<Vec<String>> {
    let lines = match step {
        Step::Echo(text) => vec![text.clone()],
        Step::Create(fields) => {
            let id = engine.create_issue(fields.clone())?;
            vec![format!(
                "Issue {} created against transaction {}",
                id, fields.txn_ref
            )]
        }
        Step::AddAgent(spec) => {
            let id = engine.add_agent(&spec.name, &spec.contact, spec.expertise.iter().copied())?;
            vec![format!("Agent {} created", id)]
        }
        Step::Assign(raw) => {
            let id = IssueId::parse(raw)?;
            let assignment = engine.assign_issue(&id)?;
            if assignment.waitlisted {
                vec![format!(
                    "Issue {} added to waitlist of Agent {}",
                    id, assignment.agent_id
                )]
            } else {
                vec![format!(
                    "Issue {} assigned to Agent {}",
                    id, assignment.agent_id
                )]
            }
        }
        Step::Resolve { issue, resolution } => {
            let id = IssueId::parse(issue)?;
            let outcome = engine.resolve_issue(&id, resolution)?;
            let follow_up = match outcome.promoted {
                Some(next) => format!("Issue {} promoted for Agent {}", next, outcome.agent_id),
                None => format!("Agent {} is idle", outcome.agent_id),
            };
            vec![format!("Issue {} resolved", id), follow_up]
        }
        Step::Update {
            issue,
            note,
            status,
        } => {
            let id = IssueId::parse(issue)?;
            let updated = engine.update_issue(&id, note, *status)?;
            vec![format!("Issue {} updated to {}", updated.id, updated.status)]
        }
        Step::List(pairs) => {
            let filter =
                IssueFilter::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
            let issues = engine.get_issues(&filter);
            if issues.is_empty() {
                vec!["No matching issues".to_string()]
            } else {
                issues.iter().map(|issue| issue.to_string()).collect()
            }
        }
        Step::History => engine
            .view_work_history()
            .into_iter()
            .map(|(agent, resolved)| {
                let ids: Vec<&str> = resolved.iter().map(|id| id.as_str()).collect();
                format!("{} -> [{}]", agent, ids.join(", "))
            })
            .collect(),
        Step::Roster => render_roster(engine),
    };
    Ok(lines)
}

fn render_roster(engine: &ResolutionEngine) -> Vec<String> {
    let snapshot = engine.snapshot();
    let mut lines = vec!["Idle:".to_string()];
    if snapshot.idle.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (category, agents) in &snapshot.idle {
        let ids: Vec<&str> = agents.iter().map(|id| id.as_str()).collect();
        lines.push(format!("  {:12} {}", category.to_string(), ids.join(", ")));
    }

    lines.push("Busy:".to_string());
    if snapshot.busy.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (agent, load) in &snapshot.busy {
        lines.push(format!("  {:12} {} queued", agent.as_str(), load));
    }
    lines
}

fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)
            .map_err(|e| DeskError::UserError(format!("failed to write output: {}", e)))?;
    }
    Ok(())
}
