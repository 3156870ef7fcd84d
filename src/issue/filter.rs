//! Equality filters over issue attributes.

use super::{Issue, IssueCategory, IssueStatus};
use crate::error::{DeskError, Result};

/// A conjunction of equality predicates. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub id: Option<String>,
    pub txn_ref: Option<String>,
    pub category: Option<IssueCategory>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub status: Option<IssueStatus>,
    pub resolution: Option<String>,
}

impl IssueFilter {
    /// Build a filter from `key -> value` pairs.
    ///
    /// Keys are case-insensitive. Unknown keys and unparseable category or
    /// status values are rejected rather than ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = IssueFilter::default();
        for (key, value) in pairs {
            match key.trim().to_lowercase().as_str() {
                "id" => filter.id = Some(value.to_string()),
                "txn_id" | "txnid" | "txn_ref" | "transaction" => {
                    filter.txn_ref = Some(value.to_string())
                }
                "type" | "category" => {
                    let category = IssueCategory::from_str(value).ok_or_else(|| {
                        DeskError::ValidationError(format!("unknown issue category '{}'", value))
                    })?;
                    filter.category = Some(category);
                }
                "subject" => filter.subject = Some(value.to_string()),
                "description" => filter.description = Some(value.to_string()),
                "email" | "contact" => filter.contact = Some(value.to_string()),
                "status" => {
                    let status = IssueStatus::from_str(value).ok_or_else(|| {
                        DeskError::ValidationError(format!("unknown issue status '{}'", value))
                    })?;
                    filter.status = Some(status);
                }
                "resolution" => filter.resolution = Some(value.to_string()),
                other => {
                    return Err(DeskError::ValidationError(format!(
                        "unknown issue filter key '{}'",
                        other
                    )));
                }
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        *self == IssueFilter::default()
    }

    /// Whether the issue satisfies every set predicate.
    pub fn matches(&self, issue: &Issue) -> bool {
        fn eq(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().is_none_or(|e| e == actual)
        }

        eq(&self.id, issue.id.as_str())
            && eq(&self.txn_ref, &issue.txn_ref)
            && self.category.is_none_or(|c| c == issue.category)
            && eq(&self.subject, &issue.subject)
            && eq(&self.description, &issue.description)
            && eq(&self.contact, &issue.contact)
            && self.status.is_none_or(|s| s == issue.status)
            && eq(&self.resolution, &issue.resolution)
    }
}
