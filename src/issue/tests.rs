//! Tests for issue records, status transitions, and the in-memory store.

use super::*;

fn new_issue(txn: &str, category: IssueCategory, contact: &str) -> NewIssue {
    NewIssue {
        txn_ref: txn.to_string(),
        category,
        subject: "Payment Failed".to_string(),
        description: "My payment failed but money is debited".to_string(),
        contact: contact.to_string(),
    }
}

#[test]
fn test_create_issue_starts_created() {
    let issue = Issue::create(new_issue("T1", IssueCategory::Payment, "u@test.com")).unwrap();
    assert_eq!(issue.id.as_str(), "IT1");
    assert_eq!(issue.status, IssueStatus::Created);
    assert!(issue.resolution.is_empty());
    assert_eq!(issue.created_at, issue.updated_at);
}

#[test]
fn test_create_issue_rejects_empty_fields() {
    let mut fields = new_issue("T1", IssueCategory::Payment, "u@test.com");
    fields.subject = "  ".to_string();
    let err = Issue::create(fields).unwrap_err();
    assert!(matches!(err, DeskError::ValidationError(_)));
    assert!(err.to_string().contains("subject"));

    let fields = new_issue("", IssueCategory::Gold, "u@test.com");
    assert!(Issue::create(fields).is_err());
}

#[test]
fn test_status_moves_forward_only() {
    let mut issue = Issue::create(new_issue("T1", IssueCategory::Gold, "u@test.com")).unwrap();
    issue.set_status(IssueStatus::InProgress, "looking into it").unwrap();
    issue.set_status(IssueStatus::InProgress, "still looking").unwrap();
    assert_eq!(issue.resolution, "still looking");

    issue.set_status(IssueStatus::Resolved, "refunded").unwrap();
    let err = issue.set_status(IssueStatus::InProgress, "reopen").unwrap_err();
    assert!(matches!(err, DeskError::ValidationError(_)));
    assert_eq!(issue.status, IssueStatus::Resolved);
    assert_eq!(issue.resolution, "refunded");
}

#[test]
fn test_status_requires_note() {
    let mut issue = Issue::create(new_issue("T1", IssueCategory::Gold, "u@test.com")).unwrap();
    let err = issue.set_status(IssueStatus::Resolved, "").unwrap_err();
    assert_eq!(
        err,
        DeskError::ValidationError("resolution cannot be empty".to_string())
    );
    assert_eq!(issue.status, IssueStatus::Created);
}

#[test]
fn test_category_parsing() {
    assert_eq!(IssueCategory::from_str("payment"), Some(IssueCategory::Payment));
    assert_eq!(IssueCategory::from_str("Mutual Fund"), Some(IssueCategory::MutualFund));
    assert_eq!(IssueCategory::from_str("mutual_fund"), Some(IssueCategory::MutualFund));
    assert_eq!(IssueCategory::from_str("MutualFund"), Some(IssueCategory::MutualFund));
    assert_eq!(IssueCategory::from_str("crypto"), None);
    assert_eq!(IssueCategory::MutualFund.to_string(), "Mutual Fund");
}

#[test]
fn test_category_yaml_forms() {
    let c: IssueCategory = serde_yaml::from_str("mutual_fund").unwrap();
    assert_eq!(c, IssueCategory::MutualFund);
    let c: IssueCategory = serde_yaml::from_str("MutualFund").unwrap();
    assert_eq!(c, IssueCategory::MutualFund);
}

#[test]
fn test_status_parsing() {
    assert_eq!(IssueStatus::from_str("InProgress"), Some(IssueStatus::InProgress));
    assert_eq!(IssueStatus::from_str("in_progress"), Some(IssueStatus::InProgress));
    assert_eq!(IssueStatus::from_str("RESOLVED"), Some(IssueStatus::Resolved));
    assert_eq!(IssueStatus::from_str("open"), None);
}

#[test]
fn test_store_create_and_get() {
    let store = InMemoryIssueStore::new();
    let id = store
        .create(new_issue("T1", IssueCategory::Payment, "u@test.com"))
        .unwrap();
    assert_eq!(store.get(&id).unwrap().txn_ref, "T1");
    assert_eq!(store.len(), 1);

    let missing = IssueId::for_transaction("T404");
    assert!(matches!(store.get(&missing), Err(DeskError::NotFound(_))));
}

#[test]
fn test_store_rejects_duplicate_transaction() {
    let store = InMemoryIssueStore::new();
    store
        .create(new_issue("T1", IssueCategory::Payment, "u@test.com"))
        .unwrap();
    let err = store
        .create(new_issue("T1", IssueCategory::Gold, "other@test.com"))
        .unwrap_err();
    assert!(matches!(err, DeskError::ValidationError(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(&IssueId::for_transaction("T1")).unwrap().category,
        IssueCategory::Payment
    );
}

#[test]
fn test_store_set_status_unknown_issue() {
    let store = InMemoryIssueStore::new();
    let err = store
        .set_status(&IssueId::for_transaction("T9"), IssueStatus::Resolved, "done")
        .unwrap_err();
    assert!(matches!(err, DeskError::NotFound(_)));
}

#[test]
fn test_store_filter_by_contact_and_status() {
    let store = InMemoryIssueStore::new();
    store
        .create(new_issue("T1", IssueCategory::Payment, "one@test.com"))
        .unwrap();
    store
        .create(new_issue("T2", IssueCategory::MutualFund, "two@test.com"))
        .unwrap();
    store
        .create(new_issue("T3", IssueCategory::Payment, "two@test.com"))
        .unwrap();
    store
        .set_status(&IssueId::for_transaction("T3"), IssueStatus::Resolved, "fixed")
        .unwrap();

    let by_contact = store.filter(&IssueFilter::from_pairs([("email", "two@test.com")]).unwrap());
    let ids: Vec<&str> = by_contact.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["IT2", "IT3"]);

    let resolved = store.filter(
        &IssueFilter::from_pairs([("email", "two@test.com"), ("status", "resolved")]).unwrap(),
    );
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].resolution, "fixed");

    let payments = store.filter(&IssueFilter::from_pairs([("type", "Payment")]).unwrap());
    assert_eq!(payments.len(), 2);

    assert_eq!(store.filter(&IssueFilter::default()).len(), 3);
}
