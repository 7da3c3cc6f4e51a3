//! # Audit Checks
//!
//! The four independent checks the audit pipeline runs over a merchant's
//! stored state. Each check is a pure function from already-fetched records
//! to a [`CheckOutcome`]; the pipeline folds the outcomes into one bounded
//! score.
//!
//! ## Invariant
//!
//! Checks are order-insensitive. Deductions are flat per check (never
//! scaled by how many records triggered them), and missing optional fields
//! produce findings, never errors.

use compass_core::{
    ComplianceStatus, DataCollectionPoint, Finding, Priority, PrivacyPolicy, Recommendation,
    Score, Severity,
};

// ---------------------------------------------------------------------------
// Deductions
// ---------------------------------------------------------------------------

/// Deduction when no privacy policy exists at all.
pub const NO_POLICY_DEDUCTION: u32 = 30;
/// Deduction when a policy exists but is not published.
pub const UNPUBLISHED_POLICY_DEDUCTION: u32 = 15;
/// Deduction when no data-collection points are documented.
pub const NO_DATA_POINTS_DEDUCTION: u32 = 25;
/// Deduction when any data point lacks a legal basis.
pub const MISSING_LEGAL_BASIS_DEDUCTION: u32 = 20;
/// Deduction when any data point lacks a retention period.
pub const MISSING_RETENTION_DEDUCTION: u32 = 10;

// ---------------------------------------------------------------------------
// CheckOutcome
// ---------------------------------------------------------------------------

/// The immutable result of one audit check.
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    /// Findings raised by this check.
    pub findings: Vec<Finding>,
    /// Recommendations raised by this check.
    pub recommendations: Vec<Recommendation>,
    /// Flat score deduction contributed by this check.
    pub deduction: u32,
}

impl CheckOutcome {
    fn clean() -> Self {
        Self::default()
    }
}

/// Aggregated audit result after folding all check outcomes.
#[derive(Debug, Clone)]
pub struct AuditResult {
    /// Final compliance score, `clamp(100 - sum(deductions))`.
    pub score: Score,
    /// Tri-state status derived from the score.
    pub status: ComplianceStatus,
    /// All findings, in check order.
    pub findings: Vec<Finding>,
    /// All recommendations, in check order.
    pub recommendations: Vec<Recommendation>,
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Policy check: no policy is critical, an unpublished policy is high.
///
/// `policies` is expected newest-first; only the newest record's published
/// flag is inspected.
pub fn check_policy(policies: &[PrivacyPolicy]) -> CheckOutcome {
    match policies.first() {
        None => CheckOutcome {
            findings: vec![Finding::new(
                "Privacy Policy",
                Severity::Critical,
                "No privacy policy found",
                "Operating without a privacy policy violates GDPR Art. 13 and CCPA disclosure requirements",
            )],
            recommendations: Vec::new(),
            deduction: NO_POLICY_DEDUCTION,
        },
        Some(policy) if !policy.published => CheckOutcome {
            findings: vec![Finding::new(
                "Privacy Policy",
                Severity::High,
                "Privacy policy exists but is not published",
                "Customers cannot review how their data is processed",
            )],
            recommendations: Vec::new(),
            deduction: UNPUBLISHED_POLICY_DEDUCTION,
        },
        Some(_) => CheckOutcome::clean(),
    }
}

/// Data-mapping check: zero documented collection points is a high finding
/// plus a recommendation with concrete action items.
pub fn check_data_mapping(points: &[DataCollectionPoint]) -> CheckOutcome {
    if !points.is_empty() {
        return CheckOutcome::clean();
    }
    CheckOutcome {
        findings: vec![Finding::new(
            "Data Mapping",
            Severity::High,
            "No data collection points documented",
            "Unable to demonstrate what personal data is collected or why",
        )],
        recommendations: vec![Recommendation {
            priority: Priority::High,
            title: "Document data collection points".to_string(),
            description: "Map every place personal data enters the store so legal bases and retention can be assigned".to_string(),
            action_items: vec![
                "Inventory checkout, account, and marketing forms".to_string(),
                "Record the data types each source collects".to_string(),
                "Assign a legal basis to each collection point".to_string(),
            ],
            estimated_effort: "1-2 weeks".to_string(),
        }],
        deduction: NO_DATA_POINTS_DEDUCTION,
    }
}

/// Legal-basis check: any point missing a legal basis is a critical finding.
/// The deduction is flat regardless of how many points are affected.
pub fn check_legal_basis(points: &[DataCollectionPoint]) -> CheckOutcome {
    let missing = points.iter().filter(|p| p.legal_basis.is_none()).count();
    if missing == 0 {
        return CheckOutcome::clean();
    }
    CheckOutcome {
        findings: vec![Finding::new(
            "Legal Basis",
            Severity::Critical,
            format!("{missing} data collection point(s) have no legal basis"),
            "Processing without a legal basis violates GDPR Art. 6",
        )],
        recommendations: Vec::new(),
        deduction: MISSING_LEGAL_BASIS_DEDUCTION,
    }
}

/// Retention check: any point missing a retention period is a medium
/// finding. Flat deduction, same as the legal-basis check.
pub fn check_retention(points: &[DataCollectionPoint]) -> CheckOutcome {
    let missing = points
        .iter()
        .filter(|p| p.retention_period.is_none())
        .count();
    if missing == 0 {
        return CheckOutcome::clean();
    }
    CheckOutcome {
        findings: vec![Finding::new(
            "Data Retention",
            Severity::Medium,
            format!("{missing} data collection point(s) have no retention period"),
            "Indefinite retention conflicts with storage-limitation principles",
        )],
        recommendations: Vec::new(),
        deduction: MISSING_RETENTION_DEDUCTION,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold check outcomes into the final score, status, and result lists.
pub fn aggregate(outcomes: impl IntoIterator<Item = CheckOutcome>) -> AuditResult {
    let (findings, recommendations, deduction) = outcomes.into_iter().fold(
        (Vec::new(), Vec::new(), 0i64),
        |(mut findings, mut recommendations, deduction), outcome| {
            findings.extend(outcome.findings);
            recommendations.extend(outcome.recommendations);
            (findings, recommendations, deduction + i64::from(outcome.deduction))
        },
    );
    let score = Score::clamped(100 - deduction);
    AuditResult {
        score,
        status: ComplianceStatus::from_score(score),
        findings,
        recommendations,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
