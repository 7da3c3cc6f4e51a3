//! # Risk Sub-Factor Analyses
//!
//! The five independent per-app analyses behind the risk composite. Each is
//! a pure function from the app record to a [`FactorOutcome`]: findings plus
//! a raw subscore. Subscores are additive within a factor and are not
//! clamped here; the composite clamps after weighting.

use compass_core::{DataAccessLevel, EncryptionStatus, Finding, RiskFactor, Severity, ThirdPartyApp};

// ---------------------------------------------------------------------------
// High-risk permission scopes
// ---------------------------------------------------------------------------

/// Scope patterns treated as high-risk. A declared scope counts when it
/// contains any of these substrings.
pub const HIGH_RISK_SCOPE_PATTERNS: &[&str] = &[
    "read_customers",
    "write_customers",
    "read_orders",
    "write_orders",
    "read_all_orders",
    "read_users",
    "write_users",
    "write_script_tags",
];

// ---------------------------------------------------------------------------
// FactorOutcome
// ---------------------------------------------------------------------------

/// Result of one sub-factor analysis.
#[derive(Debug, Clone, Default)]
pub struct FactorOutcome {
    /// Findings raised by this factor.
    pub findings: Vec<Finding>,
    /// Raw (unweighted) subscore.
    pub subscore: u32,
}

impl FactorOutcome {
    fn clean() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Analyses
// ---------------------------------------------------------------------------

/// Data-access factor: full access is critical, read-write high; reaching
/// sensitive data adds on top of either.
pub fn data_access_factor(app: &ThirdPartyApp) -> FactorOutcome {
    let mut outcome = FactorOutcome::clean();
    match app.data_access {
        DataAccessLevel::Full => {
            outcome.findings.push(Finding::new(
                "Data Access",
                Severity::Critical,
                format!("{} has unrestricted access to store data", app.name),
                "A single compromised app exposes all merchant data",
            ));
            outcome.subscore += 80;
        }
        DataAccessLevel::ReadWrite => {
            outcome.findings.push(Finding::new(
                "Data Access",
                Severity::High,
                format!("{} has read-write access to store data", app.name),
                "The app can modify customer records",
            ));
            outcome.subscore += 60;
        }
        DataAccessLevel::ReadOnly | DataAccessLevel::None => {}
    }
    if app.touches_sensitive_data() {
        outcome.findings.push(Finding::new(
            "Data Access",
            Severity::High,
            format!("{} processes sensitive data types", app.name),
            "Personal or payment data flows to a third party",
        ));
        outcome.subscore += 40;
    }
    outcome
}

/// Permission factor: graded by how many declared scopes match the
/// high-risk pattern list.
pub fn permissions_factor(app: &ThirdPartyApp) -> FactorOutcome {
    let risky = app
        .permission_scopes
        .iter()
        .filter(|scope| HIGH_RISK_SCOPE_PATTERNS.iter().any(|p| scope.contains(p)))
        .count();
    match risky {
        0 => FactorOutcome::clean(),
        1..=3 => FactorOutcome {
            findings: vec![Finding::new(
                "Permissions",
                Severity::Medium,
                format!("{} requests {risky} high-risk permission scope(s)", app.name),
                "Broad scopes increase the blast radius of a compromise",
            )],
            subscore: 40,
        },
        _ => FactorOutcome {
            findings: vec![Finding::new(
                "Permissions",
                Severity::High,
                format!("{} requests {risky} high-risk permission scopes", app.name),
                "The scope set is far broader than most apps need",
            )],
            subscore: 70,
        },
    }
}

/// Compliance factor: missing privacy-policy URL and undisclosed retention
/// each contribute; both may fire on the same app.
pub fn compliance_factor(app: &ThirdPartyApp) -> FactorOutcome {
    let mut outcome = FactorOutcome::clean();
    if app.privacy_policy_url.is_none() {
        outcome.findings.push(Finding::new(
            "Compliance",
            Severity::High,
            format!("{} publishes no privacy policy", app.name),
            "No evidence of how the vendor processes shared data",
        ));
        outcome.subscore += 60;
    }
    if app.retention_period.is_none() {
        outcome.findings.push(Finding::new(
            "Compliance",
            Severity::Medium,
            format!("{} does not disclose a data retention period", app.name),
            "Shared data may be retained indefinitely",
        ));
        outcome.subscore += 30;
    }
    outcome
}

/// Security factor: undeclared encryption posture.
pub fn security_factor(app: &ThirdPartyApp) -> FactorOutcome {
    if app.encryption != EncryptionStatus::Unknown {
        return FactorOutcome::clean();
    }
    FactorOutcome {
        findings: vec![Finding::new(
            "Security",
            Severity::Medium,
            format!("{} declares no encryption posture", app.name),
            "Shared data may be stored unencrypted",
        )],
        subscore: 30,
    }
}

/// Reputation factor: unknown or placeholder developer identity.
pub fn reputation_factor(app: &ThirdPartyApp) -> FactorOutcome {
    if !app.developer_unknown() {
        return FactorOutcome::clean();
    }
    FactorOutcome {
        findings: vec![Finding::new(
            "Reputation",
            Severity::Medium,
            format!("{} has no identified developer", app.name),
            "No accountable party for the vendor relationship",
        )],
        subscore: 40,
    }
}

/// Run all five analyses in canonical factor order.
pub fn analyze_app(app: &ThirdPartyApp) -> [(RiskFactor, FactorOutcome); 5] {
    [
        (RiskFactor::DataAccess, data_access_factor(app)),
        (RiskFactor::Permissions, permissions_factor(app)),
        (RiskFactor::Compliance, compliance_factor(app)),
        (RiskFactor::Security, security_factor(app)),
        (RiskFactor::Reputation, reputation_factor(app)),
    ]
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::{AppId, DataType, MerchantId, RiskLevel, Score};

    fn quiet_app() -> ThirdPartyApp {
        ThirdPartyApp {
            id: AppId::new(),
            merchant_id: MerchantId::new(),
            name: "Theme Tweaker".to_string(),
            category: "design".to_string(),
            permission_scopes: vec!["read_themes".to_string()],
            data_access: DataAccessLevel::ReadOnly,
            data_types: vec![],
            privacy_policy_url: Some("https://example.com/privacy".to_string()),
            retention_period: Some("90 days".to_string()),
            encryption: compass_core::EncryptionStatus::Encrypted,
            developer: Some("Acme Software".to_string()),
            risk_level: RiskLevel::Low,
            risk_score: Score::MIN,
            compliance_issues: vec![],
            last_assessed: None,
        }
    }

    #[test]
    fn test_quiet_app_has_no_findings() {
        for (_, outcome) in analyze_app(&quiet_app()) {
            assert_eq!(outcome.subscore, 0);
            assert!(outcome.findings.is_empty());
        }
    }

    #[test]
    fn test_full_access_with_sensitive_data_is_additive() {
        let mut app = quiet_app();
        app.data_access = DataAccessLevel::Full;
        app.data_types = vec![DataType::Payment];
        let outcome = data_access_factor(&app);
        assert_eq!(outcome.subscore, 120);
        assert_eq!(outcome.findings.len(), 2);
        assert_eq!(outcome.findings[0].severity, Severity::Critical);
        assert_eq!(outcome.findings[1].severity, Severity::High);
    }

    #[test]
    fn test_read_write_access() {
        let mut app = quiet_app();
        app.data_access = DataAccessLevel::ReadWrite;
        let outcome = data_access_factor(&app);
        assert_eq!(outcome.subscore, 60);
        assert_eq!(outcome.findings[0].severity, Severity::High);
    }

    #[test]
    fn test_permission_grading() {
        let mut app = quiet_app();
        app.permission_scopes = vec!["read_products".to_string()];
        assert_eq!(permissions_factor(&app).subscore, 0);

        app.permission_scopes = vec!["read_customers".to_string()];
        let one = permissions_factor(&app);
        assert_eq!(one.subscore, 40);
        assert_eq!(one.findings[0].severity, Severity::Medium);

        app.permission_scopes = vec![
            "read_customers".to_string(),
            "write_orders".to_string(),
            "write_script_tags".to_string(),
            "read_all_orders".to_string(),
        ];
        let many = permissions_factor(&app);
        assert_eq!(many.subscore, 70);
        assert_eq!(many.findings[0].severity, Severity::High);
    }

    #[test]
    fn test_compliance_findings_fire_together() {
        let mut app = quiet_app();
        app.privacy_policy_url = None;
        app.retention_period = None;
        let outcome = compliance_factor(&app);
        assert_eq!(outcome.subscore, 90);
        assert_eq!(outcome.findings.len(), 2);
    }

    #[test]
    fn test_unknown_encryption_scores_30() {
        let mut app = quiet_app();
        app.encryption = compass_core::EncryptionStatus::Unknown;
        assert_eq!(security_factor(&app).subscore, 30);
    }

    #[test]
    fn test_unknown_developer_scores_40() {
        let mut app = quiet_app();
        app.developer = None;
        assert_eq!(reputation_factor(&app).subscore, 40);
        app.developer = Some("Unknown Developer".to_string());
        assert_eq!(reputation_factor(&app).subscore, 40);
    }
}
