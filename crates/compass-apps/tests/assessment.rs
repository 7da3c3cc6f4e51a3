//! Fleet assessment scenarios against the in-memory store.

use compass_apps::{assess_risk, RiskModelConfig};
use compass_core::{
    AppId, BusinessType, ComplianceStatus, DataAccessLevel, DataType, EncryptionStatus,
    Jurisdiction, MerchantId, MerchantProfile, Priority, RiskLevel, Score, ThirdPartyApp,
    Timestamp,
};
use compass_store::{ComplianceStore, MemoryStore};

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
        compliance_status: ComplianceStatus::Pending,
        created_at: now(),
    }
}

fn clean_app(merchant_id: MerchantId, name: &str) -> ThirdPartyApp {
    ThirdPartyApp {
        id: AppId::new(),
        merchant_id,
        name: name.to_string(),
        category: "design".to_string(),
        permission_scopes: vec![],
        data_access: DataAccessLevel::ReadOnly,
        data_types: vec![],
        privacy_policy_url: Some("https://example.com/privacy".to_string()),
        retention_period: Some("90 days".to_string()),
        encryption: EncryptionStatus::Encrypted,
        developer: Some("Acme Software".to_string()),
        risk_level: RiskLevel::Low,
        risk_score: Score::MIN,
        compliance_issues: vec![],
        last_assessed: None,
    }
}

fn risky_app(merchant_id: MerchantId, name: &str) -> ThirdPartyApp {
    ThirdPartyApp {
        permission_scopes: vec![
            "read_customers".to_string(),
            "write_orders".to_string(),
            "write_script_tags".to_string(),
            "read_all_orders".to_string(),
        ],
        data_access: DataAccessLevel::Full,
        data_types: vec![DataType::Payment],
        privacy_policy_url: None,
        retention_period: None,
        encryption: EncryptionStatus::Unknown,
        developer: None,
        ..clean_app(merchant_id, name)
    }
}

#[tokio::test]
async fn test_empty_fleet_is_safe() {
    let store = MemoryStore::new();
    let m = merchant();
    let id = m.id;
    store.add_merchant(m).await;

    let assessment = assess_risk(&store, &RiskModelConfig::default(), id, now())
        .await
        .unwrap();

    assert_eq!(assessment.total_apps, 0);
    assert_eq!(assessment.high_risk_apps, 0);
    assert_eq!(assessment.overall_risk_score.value(), 0);
    assert!(assessment.recommendations.is_empty());
    assert!(assessment.gaps.is_empty());
}

#[tokio::test]
async fn test_risky_fleet_assessment() {
    let store = MemoryStore::new();
    let m = merchant();
    let id = m.id;
    store.add_merchant(m).await;
    store.add_app(risky_app(id, "Data Hoover")).await;
    store.add_app(clean_app(id, "Theme Tweaker")).await;

    let assessment = assess_risk(&store, &RiskModelConfig::default(), id, now())
        .await
        .unwrap();

    // The worst-case app composites to 80 (critical); the clean app to 0.
    assert_eq!(assessment.total_apps, 2);
    assert_eq!(assessment.high_risk_apps, 1);
    assert_eq!(assessment.low_risk_apps, 1);
    assert_eq!(assessment.overall_risk_score.value(), 40);

    // Score 80 > 70: the urgent bucket names the risky app only.
    assert_eq!(assessment.recommendations.len(), 1);
    assert_eq!(assessment.recommendations[0].priority, Priority::Urgent);
    assert!(assessment.recommendations[0]
        .description
        .contains("Data Hoover"));
    assert!(!assessment.recommendations[0]
        .description
        .contains("Theme Tweaker"));

    // Missing privacy-policy evidence lands in one shared gap.
    assert_eq!(assessment.gaps.len(), 1);
    assert_eq!(assessment.gaps[0].area, "Data Processing Agreements");
    assert_eq!(assessment.gaps[0].affected_apps, vec!["Data Hoover"]);
}

#[tokio::test]
async fn test_app_records_are_refreshed() {
    let store = MemoryStore::new();
    let m = merchant();
    let id = m.id;
    store.add_merchant(m).await;
    store.add_app(risky_app(id, "Data Hoover")).await;

    assess_risk(&store, &RiskModelConfig::default(), id, now())
        .await
        .unwrap();

    let apps = store.list_apps(id).await.unwrap();
    assert_eq!(apps[0].risk_score.value(), 80);
    assert_eq!(apps[0].risk_level, RiskLevel::Critical);
    assert!(!apps[0].compliance_issues.is_empty());
    assert_eq!(apps[0].last_assessed, Some(now()));
}

#[tokio::test]
async fn test_breakdown_default_vs_corrected() {
    let store = MemoryStore::new();
    let m = merchant();
    let id = m.id;
    store.add_merchant(m).await;
    store.add_app(risky_app(id, "Data Hoover")).await;

    let historical = assess_risk(&store, &RiskModelConfig::default(), id, now())
        .await
        .unwrap();
    let corrected = assess_risk(
        &store,
        &RiskModelConfig {
            corrected_breakdown: true,
            ..RiskModelConfig::default()
        },
        id,
        now(),
    )
    .await
    .unwrap();

    // Historical: weight re-applied to the weighted mean (80 * w_f).
    assert_eq!(historical.risk_breakdown.data_access, 24);
    assert_eq!(historical.risk_breakdown.permissions, 20);
    // Corrected: true per-factor contributions (raw subscore * w_f),
    // rounded per component: 120*.30=36, 70*.25=17.5, 90*.20=18,
    // 30*.15=4.5, 40*.10=4.
    assert_eq!(corrected.risk_breakdown.data_access, 36);
    assert_eq!(corrected.risk_breakdown.permissions, 18);
    assert_eq!(corrected.risk_breakdown.compliance, 18);
    assert_eq!(corrected.risk_breakdown.security, 5);
    assert_eq!(corrected.risk_breakdown.reputation, 4);

    // Both runs were retained as history.
    assert_eq!(store.assessments_for(id).await.len(), 2);
}
