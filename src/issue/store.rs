//! Issue storage.

use super::{Issue, IssueFilter, IssueStatus, NewIssue};
use crate::error::{DeskError, Result};
use crate::ids::IssueId;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Record storage the engine delegates to. Holds no assignment logic.
pub trait IssueStore: Send + Sync {
    /// Store a new issue and return its id.
    fn create(&self, fields: NewIssue) -> Result<IssueId>;

    /// Fetch a copy of an issue.
    fn get(&self, id: &IssueId) -> Result<Issue>;

    /// Move an issue to `status` with `note` as its resolution text.
    fn set_status(&self, id: &IssueId, status: IssueStatus, note: &str) -> Result<Issue>;

    /// All issues matching the filter, ordered by id.
    fn filter(&self, filter: &IssueFilter) -> Vec<Issue>;

    /// Number of stored issues.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local issue store.
#[derive(Debug, Default)]
pub struct InMemoryIssueStore {
    issues: RwLock<BTreeMap<IssueId, Issue>>,
}

impl InMemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<IssueId, Issue>> {
        self.issues.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<IssueId, Issue>> {
        self.issues.write().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl IssueStore for InMemoryIssueStore {
    fn create(&self, fields: NewIssue) -> Result<IssueId> {
        let issue = Issue::create(fields)?;
        let mut issues = self.write();
        if issues.contains_key(&issue.id) {
            return Err(DeskError::ValidationError(format!(
                "an issue for transaction {} already exists ({})",
                issue.txn_ref, issue.id
            )));
        }
        let id = issue.id.clone();
        issues.insert(id.clone(), issue);
        Ok(id)
    }

    fn get(&self, id: &IssueId) -> Result<Issue> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("issue {}", id)))
    }

    fn set_status(&self, id: &IssueId, status: IssueStatus, note: &str) -> Result<Issue> {
        let mut issues = self.write();
        let issue = issues
            .get_mut(id)
            .ok_or_else(|| DeskError::NotFound(format!("issue {}", id)))?;
        issue.set_status(status, note)?;
        Ok(issue.clone())
    }

    fn filter(&self, filter: &IssueFilter) -> Vec<Issue> {
        self.read()
            .values()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
