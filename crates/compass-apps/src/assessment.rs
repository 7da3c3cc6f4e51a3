//! # App Risk Assessment
//!
//! Per-app composite scoring and the fleet-level aggregate. The per-app
//! score is the weighted sum of the five sub-factor subscores, clamped to
//! [0,100] and thresholded into a risk tier.
//!
//! ## Breakdown approximation
//!
//! The fleet `risk_breakdown` historically re-applies each factor weight to
//! the already-weighted mean score, so its components sum close to, but not
//! exactly, the overall score. That formula is preserved as the default for
//! behavioral parity; [`RiskModelConfig::corrected_breakdown`] switches to a
//! true decomposition from the per-factor weighted contributions.

use compass_core::{
    AppRiskAssessment, CompassError, Finding, MerchantId, Priority, Recommendation,
    RiskBreakdown, RiskFactor, RiskLevel, Score, ThirdPartyApp, Timestamp,
};
use compass_store::ComplianceStore;

use crate::factors::analyze_app;
use crate::weights::{RiskModelConfig, RiskWeights};

/// Per-app score above which the fleet recommendation turns urgent.
const URGENT_SCORE_THRESHOLD: u8 = 70;

// ---------------------------------------------------------------------------
// Per-app scoring
// ---------------------------------------------------------------------------

/// One app's scored assessment before write-back.
#[derive(Debug, Clone)]
pub struct AppScorecard {
    /// Weighted composite score.
    pub score: Score,
    /// Tier from the shared thresholds.
    pub level: RiskLevel,
    /// Findings from all five factors, in factor order.
    pub findings: Vec<Finding>,
    /// Weighted contribution of each factor, in canonical factor order.
    pub contributions: [f64; 5],
}

/// Score one app: weighted sum of sub-factor subscores, clamped.
pub fn score_app(app: &ThirdPartyApp, weights: &RiskWeights) -> AppScorecard {
    let mut findings = Vec::new();
    let mut contributions = [0.0_f64; 5];
    let mut composite = 0.0_f64;

    for (slot, (factor, outcome)) in analyze_app(app).into_iter().enumerate() {
        let contribution = f64::from(outcome.subscore) * weights.get(factor);
        contributions[slot] = contribution;
        composite += contribution;
        findings.extend(outcome.findings);
    }

    let score = Score::from_rounded(composite);
    AppScorecard {
        score,
        level: RiskLevel::from_score(u32::from(score.value())),
        findings,
        contributions,
    }
}

// ---------------------------------------------------------------------------
// Fleet assessment
// ---------------------------------------------------------------------------

/// Assess every installed app for `merchant_id`, write the refreshed risk
/// fields back onto each app record, and persist one fleet assessment.
///
/// An empty fleet yields an assessment with all counts zero and overall
/// score 0.
pub async fn assess_risk<S: ComplianceStore>(
    store: &S,
    config: &RiskModelConfig,
    merchant_id: MerchantId,
    now: Timestamp,
) -> Result<AppRiskAssessment, CompassError> {
    config.weights.validate()?;
    store.get_merchant(merchant_id).await?;
    let apps = store.list_apps(merchant_id).await?;

    let total_apps = apps.len();
    let mut high_risk_apps = 0;
    let mut medium_risk_apps = 0;
    let mut low_risk_apps = 0;
    let mut score_sum = 0.0_f64;
    let mut contribution_sums = [0.0_f64; 5];
    let mut urgent_apps = Vec::new();
    let mut missing_dpa = Vec::new();

    for mut app in apps {
        let card = score_app(&app, &config.weights);

        match card.level {
            RiskLevel::High | RiskLevel::Critical => high_risk_apps += 1,
            RiskLevel::Medium => medium_risk_apps += 1,
            RiskLevel::Low => low_risk_apps += 1,
        }
        score_sum += f64::from(card.score.value());
        for (sum, c) in contribution_sums.iter_mut().zip(card.contributions) {
            *sum += c;
        }
        if card.score.value() > URGENT_SCORE_THRESHOLD {
            urgent_apps.push(app.name.clone());
        }
        if app.privacy_policy_url.is_none() {
            missing_dpa.push(app.name.clone());
        }

        app.risk_score = card.score;
        app.risk_level = card.level;
        app.compliance_issues = card.findings;
        app.last_assessed = Some(now);
        store.upsert_app(app).await?;
    }

    let mean_score = if total_apps == 0 {
        0.0
    } else {
        score_sum / total_apps as f64
    };
    let overall_risk_score = Score::from_rounded(mean_score);
    let risk_breakdown = breakdown(config, mean_score, &contribution_sums, total_apps);

    let assessment = AppRiskAssessment {
        merchant_id,
        total_apps,
        high_risk_apps,
        medium_risk_apps,
        low_risk_apps,
        overall_risk_score,
        risk_breakdown,
        recommendations: recommendations(&urgent_apps),
        gaps: gaps(&missing_dpa),
        assessed_at: now,
    };
    store.save_app_risk_assessment(assessment.clone()).await?;
    tracing::info!(
        merchant_id = %merchant_id,
        total_apps,
        high_risk_apps,
        overall = overall_risk_score.value(),
        "app risk assessment completed"
    );
    Ok(assessment)
}

fn breakdown(
    config: &RiskModelConfig,
    mean_score: f64,
    contribution_sums: &[f64; 5],
    total_apps: usize,
) -> RiskBreakdown {
    let factor_value = |factor: RiskFactor, slot: usize| -> u8 {
        if total_apps == 0 {
            return 0;
        }
        let value = if config.corrected_breakdown {
            contribution_sums[slot] / total_apps as f64
        } else {
            mean_score * config.weights.get(factor)
        };
        Score::from_rounded(value).value()
    };
    RiskBreakdown {
        data_access: factor_value(RiskFactor::DataAccess, 0),
        permissions: factor_value(RiskFactor::Permissions, 1),
        compliance: factor_value(RiskFactor::Compliance, 2),
        security: factor_value(RiskFactor::Security, 3),
        reputation: factor_value(RiskFactor::Reputation, 4),
    }
}

fn recommendations(urgent_apps: &[String]) -> Vec<Recommendation> {
    if urgent_apps.is_empty() {
        return Vec::new();
    }
    vec![Recommendation {
        priority: Priority::Urgent,
        title: "Review or replace high-risk apps".to_string(),
        description: format!(
            "These apps scored above {URGENT_SCORE_THRESHOLD}: {}",
            urgent_apps.join(", ")
        ),
        action_items: urgent_apps
            .iter()
            .map(|name| format!("Audit data shared with {name} and evaluate alternatives"))
            .collect(),
        estimated_effort: "1-2 days per app".to_string(),
    }]
}

fn gaps(missing_dpa: &[String]) -> Vec<compass_core::AppComplianceGap> {
    if missing_dpa.is_empty() {
        return Vec::new();
    }
    vec![compass_core::AppComplianceGap {
        area: "Data Processing Agreements".to_string(),
        description: "Installed apps share merchant data without published privacy terms; \
                      data processing agreements are needed"
            .to_string(),
        risk_level: RiskLevel::High,
        affected_apps: missing_dpa.to_vec(),
    }]
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::{AppId, DataAccessLevel, DataType, EncryptionStatus};

    fn app() -> ThirdPartyApp {
        ThirdPartyApp {
            id: AppId::new(),
            merchant_id: MerchantId::new(),
            name: "Email Blaster".to_string(),
            category: "marketing".to_string(),
            permission_scopes: vec![],
            data_access: DataAccessLevel::None,
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

    #[test]
    fn test_clean_app_scores_zero() {
        let card = score_app(&app(), &RiskWeights::default());
        assert_eq!(card.score.value(), 0);
        assert_eq!(card.level, RiskLevel::Low);
        assert!(card.findings.is_empty());
    }

    #[test]
    fn test_worst_case_app_composite() {
        // Every factor maxed: 120*.30 + 70*.25 + 90*.20 + 30*.15 + 40*.10
        // = 36 + 17.5 + 18 + 4.5 + 4 = 80.
        let mut worst = app();
        worst.data_access = DataAccessLevel::Full;
        worst.data_types = vec![DataType::Payment];
        worst.permission_scopes = (0..4).map(|i| format!("write_customers_{i}")).collect();
        worst.privacy_policy_url = None;
        worst.retention_period = None;
        worst.encryption = EncryptionStatus::Unknown;
        worst.developer = None;
        let card = score_app(&worst, &RiskWeights::default());
        assert_eq!(card.score.value(), 80);
        assert_eq!(card.level, RiskLevel::Critical);
    }

    #[test]
    fn test_contributions_sum_to_composite() {
        let mut risky = app();
        risky.data_access = DataAccessLevel::ReadWrite;
        risky.privacy_policy_url = None;
        let card = score_app(&risky, &RiskWeights::default());
        let sum: f64 = card.contributions.iter().sum();
        assert_eq!(card.score, Score::from_rounded(sum));
    }

    #[test]
    fn test_risk_tier_boundaries() {
        // from_score thresholds at 80/60/40, exercised via known composites.
        for (subscore_target, expected) in [
            (85u32, RiskLevel::Critical),
            (80, RiskLevel::Critical),
            (79, RiskLevel::High),
            (60, RiskLevel::High),
            (59, RiskLevel::Medium),
            (45, RiskLevel::Medium),
            (40, RiskLevel::Medium),
            (39, RiskLevel::Low),
            (10, RiskLevel::Low),
        ] {
            assert_eq!(RiskLevel::from_score(subscore_target), expected, "{subscore_target}");
        }
    }
}
