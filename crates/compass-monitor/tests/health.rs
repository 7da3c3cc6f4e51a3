//! Health check and metrics scenarios against the in-memory store.

use compass_core::{
    BusinessType, ComplianceStatus, DataType, Jurisdiction, MerchantId, MerchantProfile, Score,
    Severity, Timestamp,
};
use compass_state::ComplianceAudit;
use compass_store::{BreachIncident, ComplianceStore, ConsentWithdrawal, DataSubjectRequest, MemoryStore};

fn now() -> Timestamp {
    Timestamp::parse("2026-03-01T00:00:00Z").unwrap()
}

fn merchant() -> MerchantProfile {
    MerchantProfile {
        id: MerchantId::new(),
        shop_name: "Aurora Candles".to_string(),
        business_type: BusinessType::Retail,
        jurisdiction: Jurisdiction::new("EU"),
        data_types: vec![DataType::Personal],
        implemented_controls: vec![],
        current_policies: vec![],
        compliance_score: Score::MAX,
        compliance_status: ComplianceStatus::Compliant,
        created_at: Timestamp::parse("2025-06-01T00:00:00Z").unwrap(),
    }
}

async fn store_with_merchant() -> (MemoryStore, MerchantId) {
    let store = MemoryStore::new();
    let m = merchant();
    let id = m.id;
    store.add_merchant(m).await;
    (store, id)
}

async fn complete_audit(store: &MemoryStore, id: MerchantId, completed_at: Timestamp) {
    let mut audit = ComplianceAudit::open(id, completed_at);
    audit
        .complete(Score::clamped(10), vec![], vec![], completed_at)
        .unwrap();
    store.save_audit(&audit).await.unwrap();
}

#[tokio::test]
async fn test_fresh_audit_and_quiet_backlog_scores_100() {
    let (store, id) = store_with_merchant().await;
    complete_audit(&store, id, Timestamp::parse("2026-02-15T00:00:00Z").unwrap()).await;

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 100);
    assert!(check.issues.is_empty());
    assert_eq!(
        check.next_audit_due,
        Timestamp::parse("2026-02-15T00:00:00Z").unwrap().plus_days(90)
    );
}

#[tokio::test]
async fn test_never_audited_merchant_is_stale_but_due_in_90_days() {
    let (store, id) = store_with_merchant().await;

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 80);
    assert_eq!(check.issues.len(), 1);
    assert_eq!(check.issues[0].severity, Severity::High);
    assert!(check.last_audit.is_none());
    // Open question resolved as: never-audited merchants are due one
    // cadence from now, not overdue immediately.
    assert_eq!(check.next_audit_due, now().plus_days(90));
}

#[tokio::test]
async fn test_aging_audit_draws_medium_penalty() {
    let (store, id) = store_with_merchant().await;
    // 70 days before `now`.
    complete_audit(&store, id, Timestamp::parse("2025-12-21T00:00:00Z").unwrap()).await;

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 90);
    assert_eq!(check.issues[0].severity, Severity::Medium);
}

#[tokio::test]
async fn test_penalties_stack_and_clamp_at_zero() {
    let (store, id) = store_with_merchant().await;
    // Stale audit (-20), overdue DSR (-30), withdrawal volume (-15),
    // breach (-40): 100 - 105 clamps to 0.
    for _ in 0..12 {
        store
            .add_withdrawal(ConsentWithdrawal {
                merchant_id: id,
                withdrawn_at: Timestamp::parse("2026-02-20T00:00:00Z").unwrap(),
            })
            .await;
    }
    store
        .add_request(DataSubjectRequest {
            merchant_id: id,
            submitted_at: Timestamp::parse("2026-01-01T00:00:00Z").unwrap(),
            pending: true,
        })
        .await;
    store
        .add_breach(BreachIncident {
            merchant_id: id,
            occurred_at: Timestamp::parse("2026-02-25T00:00:00Z").unwrap(),
        })
        .await;

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 0);
    assert_eq!(check.issues.len(), 4);
}

#[tokio::test]
async fn test_overdue_dsr_dominates_backlog_penalty() {
    let (store, id) = store_with_merchant().await;
    complete_audit(&store, id, Timestamp::parse("2026-02-15T00:00:00Z").unwrap()).await;
    // Seven pending requests, one of them overdue: only the critical
    // overdue penalty applies, not the backlog one.
    store
        .add_request(DataSubjectRequest {
            merchant_id: id,
            submitted_at: Timestamp::parse("2026-01-01T00:00:00Z").unwrap(),
            pending: true,
        })
        .await;
    for _ in 0..6 {
        store
            .add_request(DataSubjectRequest {
                merchant_id: id,
                submitted_at: Timestamp::parse("2026-02-25T00:00:00Z").unwrap(),
                pending: true,
            })
            .await;
    }

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 70);
    assert_eq!(check.issues.len(), 1);
    assert_eq!(check.issues[0].severity, Severity::Critical);
}

#[tokio::test]
async fn test_large_fresh_backlog_draws_high_penalty() {
    let (store, id) = store_with_merchant().await;
    complete_audit(&store, id, Timestamp::parse("2026-02-15T00:00:00Z").unwrap()).await;
    for _ in 0..6 {
        store
            .add_request(DataSubjectRequest {
                merchant_id: id,
                submitted_at: Timestamp::parse("2026-02-25T00:00:00Z").unwrap(),
                pending: true,
            })
            .await;
    }

    let check = compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    assert_eq!(check.overall_score.value(), 85);
    assert_eq!(check.issues[0].severity, Severity::High);
}

#[tokio::test]
async fn test_critical_issues_raise_alerts() {
    let (store, id) = store_with_merchant().await;
    complete_audit(&store, id, Timestamp::parse("2026-02-15T00:00:00Z").unwrap()).await;
    store
        .add_breach(BreachIncident {
            merchant_id: id,
            occurred_at: Timestamp::parse("2026-02-25T00:00:00Z").unwrap(),
        })
        .await;

    compass_monitor::health_check(&store, &store, id, now())
        .await
        .unwrap();

    let alerts = store.alerts_for(id).await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].alert_type, "data_breach");
    assert_eq!(alerts[0].severity, Severity::Critical);

    // The raised alert now feeds the metrics formula: 100 - 10 (breach)
    // - 15 (critical active alert) = 75.
    let metrics = compass_monitor::monitoring_metrics(&store, id, now())
        .await
        .unwrap();
    assert_eq!(metrics.score.value(), 75);
    assert_eq!(metrics.active_alerts.critical, 1);
}
