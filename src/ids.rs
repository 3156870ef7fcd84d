//! Identifier types for agents and issues.
//!
//! Agent ids are handed out from a counter (`A1`, `A2`, ...). Issue ids are
//! derived from the transaction reference the issue was raised against
//! (`T1` becomes `IT1`).

use crate::error::{DeskError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Regex pattern for valid agent IDs.
static AGENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^A\d+$").expect("Invalid agent ID regex"));

/// Regex pattern for valid issue IDs.
static ISSUE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^I\S+$").expect("Invalid issue ID regex"));

/// Identifier of a registered agent.
///
/// Ids order by registration sequence, so `A2` sorts before `A10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Build the id for the `n`th registered agent.
    pub fn from_sequence(n: u32) -> Self {
        Self(format!("A{}", n))
    }

    /// Parse a user-supplied agent id, normalizing to uppercase and
    /// dropping leading zeros.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        let invalid = || {
            DeskError::ValidationError(format!(
                "invalid agent id '{}': expected format A<number> (e.g., A1)",
                raw
            ))
        };
        if !AGENT_ID_REGEX.is_match(&normalized) {
            return Err(invalid());
        }
        let sequence: u32 = normalized[1..].parse().map_err(|_| invalid())?;
        Ok(Self::from_sequence(sequence))
    }

    /// Registration sequence number encoded in the id.
    pub fn sequence(&self) -> u32 {
        self.0[1..].parse().unwrap_or(u32::MAX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for AgentId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sequence()
            .cmp(&other.sequence())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for AgentId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an issue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Derive the issue id for a transaction reference.
    pub fn for_transaction(txn_ref: &str) -> Self {
        Self(format!("I{}", txn_ref.trim()))
    }

    /// Parse a user-supplied issue id. Whitespace is trimmed; case is kept
    /// since transaction references are case-sensitive.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !ISSUE_ID_REGEX.is_match(trimmed) {
            return Err(DeskError::ValidationError(format!(
                "invalid issue id '{}': expected format I<transaction> (e.g., IT1)",
                raw
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
