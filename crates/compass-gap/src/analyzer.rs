//! # Gap Analyzer
//!
//! Filters the rule catalog to a merchant's applicable rules, classifies
//! each via category-specific logic, and aggregates into a weighted
//! compliance score plus a capped priority-action list.
//!
//! ## Invariant
//!
//! Applicability conditions are opt-in: an empty condition list never
//! excludes a rule. A mandatory rule classified non-compliant has its risk
//! level escalated exactly one step, saturating at critical.

use serde::{Deserialize, Serialize};

use compass_core::{
    remediation_deadline, CompassError, ComplianceGap, GapStatus, MerchantId, MerchantProfile,
    RegulatoryRule, RequirementLevel, RiskLevel, RuleCategory, Score, Timestamp,
};
use compass_store::ComplianceStore;

// ---------------------------------------------------------------------------
// GapAnalysis
// ---------------------------------------------------------------------------

/// Result of one gap-analysis run. Always recomputed, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// The merchant analyzed.
    pub merchant_id: MerchantId,
    /// How many catalog rules applied to this merchant.
    pub applicable_rules: usize,
    /// One gap per applicable rule, in catalog order.
    pub gaps: Vec<ComplianceGap>,
    /// Weighted compliance score; 100 when no rules apply.
    pub overall_score: Score,
    /// Action strings for the top high/critical gaps, at most five.
    pub priority_actions: Vec<String>,
    /// When the analysis ran.
    pub analyzed_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Fetch the merchant and active catalog, then run [`analyze`].
pub async fn gap_analysis<S: ComplianceStore>(
    store: &S,
    merchant_id: MerchantId,
    now: Timestamp,
) -> Result<GapAnalysis, CompassError> {
    let profile = store.get_merchant(merchant_id).await?;
    let rules = store.list_active_rules().await?;
    let analysis = analyze(&profile, &rules, now);
    tracing::info!(
        merchant_id = %merchant_id,
        applicable = analysis.applicable_rules,
        score = analysis.overall_score.value(),
        "gap analysis completed"
    );
    Ok(analysis)
}

/// Run the gap analysis over an already-fetched profile and catalog.
///
/// Pure: `now` feeds the deadline computation and the result stamp.
pub fn analyze(profile: &MerchantProfile, rules: &[RegulatoryRule], now: Timestamp) -> GapAnalysis {
    let applicable: Vec<&RegulatoryRule> = rules
        .iter()
        .filter(|r| r.active && rule_applies(r, profile))
        .collect();

    let mut gaps = Vec::with_capacity(applicable.len());
    let mut total = 0.0_f64;
    let mut max = 0.0_f64;

    for rule in &applicable {
        let (status, base_risk, action) = classify(rule, profile);
        let risk_level = escalate_if_mandatory(rule.requirement, status, base_risk);

        let weight = f64::from(rule.requirement.weight());
        max += weight;
        total += weight
            * match status {
                GapStatus::Compliant => 1.0,
                GapStatus::Partial => 0.5,
                GapStatus::NonCompliant => 0.0,
            };

        gaps.push(ComplianceGap {
            rule_id: rule.id,
            rule_title: rule.title.clone(),
            regulation: rule.regulation,
            category: rule.category,
            requirement: rule.requirement,
            status,
            risk_level,
            action,
            deadline: remediation_deadline(rule.requirement, status, now),
        });
    }

    // No applicable rules means fully compliant by definition.
    let overall_score = if max == 0.0 {
        Score::MAX
    } else {
        Score::from_rounded(total / max * 100.0)
    };

    GapAnalysis {
        merchant_id: profile.id,
        applicable_rules: applicable.len(),
        priority_actions: priority_actions(&gaps),
        gaps,
        overall_score,
        analyzed_at: now,
    }
}

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

/// Whether a rule's applicability conditions match the profile.
///
/// Order-volume thresholds are carried on the catalog entry but not
/// evaluated: the profile holds no volume figure, so they are treated as
/// unconstrained.
fn rule_applies(rule: &RegulatoryRule, profile: &MerchantProfile) -> bool {
    let a = &rule.applicability;
    let business_ok =
        a.business_types.is_empty() || a.business_types.contains(&profile.business_type);
    let jurisdiction_ok =
        a.jurisdictions.is_empty() || a.jurisdictions.contains(&profile.jurisdiction);
    let data_ok = a.data_types.is_empty()
        || a.data_types.iter().any(|d| profile.data_types.contains(d));
    business_ok && jurisdiction_ok && data_ok
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Control key evidencing a data-subject-request workflow.
const DSAR_WORKFLOW_CONTROL: &str = "dsar_workflow";

/// Category-specific classification: status, initial risk level, action.
fn classify(rule: &RegulatoryRule, profile: &MerchantProfile) -> (GapStatus, RiskLevel, String) {
    match rule.category {
        RuleCategory::PrivacyPolicy => {
            if profile.has_policy(RuleCategory::PrivacyPolicy.as_str()) {
                (
                    GapStatus::Compliant,
                    RiskLevel::Low,
                    "Keep the published privacy policy current".to_string(),
                )
            } else {
                (
                    GapStatus::NonCompliant,
                    RiskLevel::High,
                    "Publish a privacy policy covering collection, use, and sharing".to_string(),
                )
            }
        }
        RuleCategory::ConsentManagement => {
            if profile.has_control(RuleCategory::ConsentManagement.as_str()) {
                (
                    GapStatus::Compliant,
                    RiskLevel::Low,
                    "Maintain consent capture and withdrawal flows".to_string(),
                )
            } else {
                (
                    GapStatus::NonCompliant,
                    RiskLevel::High,
                    "Implement consent capture with withdrawal support".to_string(),
                )
            }
        }
        RuleCategory::CookieManagement => {
            if profile.has_control(RuleCategory::CookieManagement.as_str()) {
                (
                    GapStatus::Compliant,
                    RiskLevel::Low,
                    "Keep the cookie banner and preference center current".to_string(),
                )
            } else {
                (
                    GapStatus::NonCompliant,
                    RiskLevel::Medium,
                    "Deploy a cookie banner with granular tracking consent".to_string(),
                )
            }
        }
        RuleCategory::DataSubjectRights => {
            // A workflow control alone is at best partial evidence: this
            // check cannot verify response deadlines are actually met.
            if profile.has_control(DSAR_WORKFLOW_CONTROL) {
                (
                    GapStatus::Partial,
                    RiskLevel::Medium,
                    "Verify data-subject requests are fulfilled within statutory deadlines"
                        .to_string(),
                )
            } else {
                (
                    GapStatus::NonCompliant,
                    RiskLevel::High,
                    "Stand up a workflow for access, erasure, and portability requests"
                        .to_string(),
                )
            }
        }
        // Remaining categories share the generic control-key check. A
        // matching control key yields partial at best.
        RuleCategory::DataRetention
        | RuleCategory::DataSecurity
        | RuleCategory::BreachNotification
        | RuleCategory::VendorManagement => {
            if profile.has_control(rule.category.as_str()) {
                (
                    GapStatus::Partial,
                    RiskLevel::Medium,
                    format!("Document and evidence the {} program", rule.category),
                )
            } else {
                (
                    GapStatus::NonCompliant,
                    RiskLevel::Medium,
                    format!("Implement controls for {}", rule.category),
                )
            }
        }
    }
}

/// One-step risk escalation for mandatory non-compliant gaps.
fn escalate_if_mandatory(
    requirement: RequirementLevel,
    status: GapStatus,
    base: RiskLevel,
) -> RiskLevel {
    if requirement.is_mandatory() && status == GapStatus::NonCompliant {
        base.escalate()
    } else {
        base
    }
}

// ---------------------------------------------------------------------------
// Priority actions
// ---------------------------------------------------------------------------

/// At most five action strings from high/critical gaps, ranked descending.
///
/// The sort must be stable so rank ties preserve catalog order.
fn priority_actions(gaps: &[ComplianceGap]) -> Vec<String> {
    let mut urgent: Vec<&ComplianceGap> = gaps
        .iter()
        .filter(|g| matches!(g.risk_level, RiskLevel::High | RiskLevel::Critical))
        .collect();
    urgent.sort_by_key(|g| std::cmp::Reverse(g.risk_level.rank()));
    urgent.into_iter().take(5).map(|g| g.action.clone()).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────
