//! Tests for agent state transitions and the registry.

use super::*;

fn issue(n: u32) -> IssueId {
    IssueId::for_transaction(&format!("T{}", n))
}

fn payment_agent() -> Agent {
    Agent::new(
        AgentId::from_sequence(1),
        "Agent 1",
        "agent1@test.com",
        BTreeSet::from([IssueCategory::Payment]),
    )
    .unwrap()
}

#[test]
fn test_new_agent_is_idle() {
    let agent = payment_agent();
    assert!(agent.is_idle());
    assert_eq!(agent.load(), 0);
    assert!(agent.has_expertise(IssueCategory::Payment));
    assert!(!agent.has_expertise(IssueCategory::Gold));
}

#[test]
fn test_new_agent_validation() {
    let id = AgentId::from_sequence(1);
    let expertise = BTreeSet::from([IssueCategory::Gold]);

    let err = Agent::new(id.clone(), "", "a@test.com", expertise.clone()).unwrap_err();
    assert!(err.to_string().contains("name"));

    let err = Agent::new(id.clone(), "Agent", " ", expertise).unwrap_err();
    assert!(err.to_string().contains("contact"));

    let err = Agent::new(id, "Agent", "a@test.com", BTreeSet::new()).unwrap_err();
    assert!(err.to_string().contains("expertise"));
}

#[test]
fn test_assign_twice_is_already_busy() {
    let mut agent = payment_agent();
    agent.assign(issue(1)).unwrap();
    assert!(!agent.is_idle());

    let err = agent.assign(issue(2)).unwrap_err();
    assert_eq!(err, DeskError::AlreadyBusy("A1".to_string()));
    assert_eq!(agent.assigned, Some(issue(1)));
}

#[test]
fn test_resolve_promotes_queue_head_fifo() {
    let mut agent = payment_agent();
    agent.assign(issue(1)).unwrap();
    assert_eq!(agent.enqueue(issue(2)), 1);
    assert_eq!(agent.enqueue(issue(3)), 2);

    let promoted = agent.resolve("refunded").unwrap();
    assert_eq!(promoted, Some(issue(2)));
    assert_eq!(agent.assigned, Some(issue(2)));
    assert_eq!(agent.load(), 1);

    let promoted = agent.resolve("fixed").unwrap();
    assert_eq!(promoted, Some(issue(3)));
    assert_eq!(agent.load(), 0);

    let promoted = agent.resolve("done").unwrap();
    assert_eq!(promoted, None);
    assert!(agent.is_idle());
    assert_eq!(agent.resolved_issue_ids(), vec![issue(1), issue(2), issue(3)]);
    assert_eq!(agent.resolved[0].resolution, "refunded");
}

#[test]
fn test_resolve_without_assignment() {
    let mut agent = payment_agent();
    let err = agent.resolve("nothing").unwrap_err();
    assert_eq!(err, DeskError::NothingAssigned("A1".to_string()));
    assert!(agent.resolved.is_empty());
}

#[test]
fn test_registry_assigns_sequential_ids() {
    let registry = AgentRegistry::new();
    let a1 = registry
        .register("Agent 1", "a1@test.com", [IssueCategory::Payment])
        .unwrap();
    let a2 = registry
        .register(
            "Agent 2",
            "a2@test.com",
            [IssueCategory::Payment, IssueCategory::MutualFund],
        )
        .unwrap();
    assert_eq!(a1.as_str(), "A1");
    assert_eq!(a2.as_str(), "A2");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.fetch(&a2).unwrap().expertise.len(), 2);
}

#[test]
fn test_registry_failed_registration_allocates_nothing() {
    let registry = AgentRegistry::new();
    let err = registry
        .register("Agent 1", "a1@test.com", Vec::<IssueCategory>::new())
        .unwrap_err();
    assert!(matches!(err, DeskError::ValidationError(_)));
    assert!(registry.is_empty());

    let id = registry
        .register("Agent 1", "a1@test.com", [IssueCategory::Gold])
        .unwrap();
    assert_eq!(id.as_str(), "A1");
}

#[test]
fn test_registry_unknown_agent() {
    let registry = AgentRegistry::new();
    let missing = AgentId::from_sequence(9);
    assert_eq!(
        registry.fetch(&missing).unwrap_err(),
        DeskError::NotFound("agent A9".to_string())
    );
    assert!(registry.mark_resolved(&missing, "x").is_err());
    assert!(registry.history(&missing).is_err());
}

#[test]
fn test_registry_work_history() {
    let registry = AgentRegistry::new();
    let a1 = registry
        .register("Agent 1", "a1@test.com", [IssueCategory::Payment])
        .unwrap();
    let a2 = registry
        .register("Agent 2", "a2@test.com", [IssueCategory::Gold])
        .unwrap();

    registry.mark_assigned(&a1, issue(1)).unwrap();
    assert_eq!(registry.enqueue(&a1, issue(2)).unwrap(), 1);
    registry.mark_resolved(&a1, "ok").unwrap();

    let history = registry.work_history();
    assert_eq!(history[&a1], vec![issue(1)]);
    assert!(history[&a2].is_empty());
    assert_eq!(registry.history(&a1).unwrap(), vec![issue(1)]);
    assert_eq!(registry.fetch(&a1).unwrap().assigned, Some(issue(2)));
}
