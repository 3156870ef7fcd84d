//! Issue records and the issue store.
//!
//! An issue is one reported problem against a transaction. The engine never
//! mutates issue records directly: it goes through the [`IssueStore`] trait,
//! whose in-memory implementation lives in [`store`].
//!
//! # Status Lifecycle
//!
//! ```text
//! Created -> InProgress (optional) -> Resolved
//! ```
//!
//! Status only moves forward. Every status change carries a non-empty note,
//! which becomes the issue's resolution text.

use crate::error::{DeskError, Result};
use crate::ids::IssueId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod filter;
mod store;
#[cfg(test)]
mod tests;

pub use filter::IssueFilter;
pub use store::{InMemoryIssueStore, IssueStore};

/// Expertise category an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Payment,
    #[serde(alias = "mutualfund", alias = "MutualFund")]
    MutualFund,
    Gold,
    Insurance,
    Unknown,
}

impl IssueCategory {
    /// All categories in declaration order.
    pub const ALL: [IssueCategory; 5] = [
        IssueCategory::Payment,
        IssueCategory::MutualFund,
        IssueCategory::Gold,
        IssueCategory::Insurance,
        IssueCategory::Unknown,
    ];

    /// Parse a category from a string.
    ///
    /// Accepts snake_case, the display name, and the bare variant name,
    /// case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "payment" => Some(Self::Payment),
            "mutualfund" => Some(Self::MutualFund),
            "gold" => Some(Self::Gold),
            "insurance" => Some(Self::Insurance),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::Payment => write!(f, "Payment"),
            IssueCategory::MutualFund => write!(f, "Mutual Fund"),
            IssueCategory::Gold => write!(f, "Gold"),
            IssueCategory::Insurance => write!(f, "Insurance"),
            IssueCategory::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Issue status. Ordering follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Created,
    #[serde(alias = "InProgress")]
    InProgress,
    Resolved,
}

impl IssueStatus {
    /// Parse a status from a string (case-insensitive, `_`/space tolerant).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "created" => Some(Self::Created),
            "inprogress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueStatus::Created => write!(f, "Created"),
            IssueStatus::InProgress => write!(f, "InProgress"),
            IssueStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Fields supplied when raising a new issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    /// Transaction the issue was raised against (e.g., "T1").
    pub txn_ref: String,
    pub category: IssueCategory,
    pub subject: String,
    pub description: String,
    /// Reporter contact (email).
    pub contact: String,
}

impl NewIssue {
    /// Reject records with empty required fields.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("transaction reference", &self.txn_ref),
            ("subject", &self.subject),
            ("description", &self.description),
            ("contact", &self.contact),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DeskError::ValidationError(format!(
                    "issue {} cannot be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// A stored issue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub txn_ref: String,
    pub category: IssueCategory,
    pub subject: String,
    pub description: String,
    pub contact: String,
    pub status: IssueStatus,
    /// Empty until the first status note is recorded.
    pub resolution: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Build a fresh `Created` issue from validated fields.
    pub fn create(fields: NewIssue) -> Result<Self> {
        fields.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: IssueId::for_transaction(&fields.txn_ref),
            txn_ref: fields.txn_ref.trim().to_string(),
            category: fields.category,
            subject: fields.subject,
            description: fields.description,
            contact: fields.contact,
            status: IssueStatus::Created,
            resolution: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Advance the status and record the note as resolution text.
    ///
    /// Fails if the note is empty or the status would move backward.
    pub fn set_status(&mut self, status: IssueStatus, note: &str) -> Result<()> {
        if note.trim().is_empty() {
            return Err(DeskError::ValidationError(
                "resolution cannot be empty".to_string(),
            ));
        }
        if status < self.status {
            return Err(DeskError::ValidationError(format!(
                "issue {} cannot move from {} back to {}",
                self.id, self.status, status
            )));
        }
        self.status = status;
        self.resolution = note.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_resolved(&self) -> bool {
        self.status == IssueStatus::Resolved
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({}, {}, txn {})",
            self.id, self.status, self.subject, self.category, self.contact, self.txn_ref
        )?;
        if !self.resolution.is_empty() {
            write!(f, " - {}", self.resolution)?;
        }
        Ok(())
    }
}
