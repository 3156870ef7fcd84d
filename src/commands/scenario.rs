//! Scenario file model.
//!
//! ```yaml
//! agents:
//!   - name: Agent 1
//!     contact: agent1@test.com
//!     expertise: [payment]
//! steps:
//!   - create:
//!       txn_ref: T1
//!       category: payment
//!       subject: Payment Failed
//!       description: My payment failed but money is debited
//!       contact: testUser1@test.com
//!   - assign: IT1
//!   - resolve: { issue: IT1, resolution: Refund issued }
//!   - list: { email: testUser1@test.com }
//!   - history
//! ```

use routedesk::error::{DeskError, Result};
use routedesk::issue::{IssueCategory, IssueStatus, NewIssue};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Agents registered before the first step, then the steps in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub contact: String,
    pub expertise: Vec<IssueCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Print a line of text.
    Echo(String),
    Create(NewIssue),
    AddAgent(AgentSpec),
    Assign(String),
    Resolve {
        issue: String,
        resolution: String,
    },
    Update {
        issue: String,
        note: String,
        status: IssueStatus,
    },
    /// Print issues matching `key: value` equality filters.
    List(BTreeMap<String, String>),
    History,
    /// Print idle agents per category and busy agents by load.
    Roster,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Echo(_) => "echo",
            Step::Create(_) => "create",
            Step::AddAgent(_) => "add_agent",
            Step::Assign(_) => "assign",
            Step::Resolve { .. } => "resolve",
            Step::Update { .. } => "update",
            Step::List(_) => "list",
            Step::History => "history",
            Step::Roster => "roster",
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DeskError::UserError(format!(
                "failed to read scenario file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Scenario::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| DeskError::UserError(format!("failed to parse scenario YAML: {}", e)))
    }
}
