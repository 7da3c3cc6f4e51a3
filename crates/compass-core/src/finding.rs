//! # Findings, Recommendations, and Gaps
//!
//! The three shared value types every scoring engine emits. All are
//! immutable results produced fresh per evaluation — findings and
//! recommendations are only ever persisted embedded in an audit or
//! assessment record, and gaps are always recomputed, never stored.

use serde::{Deserialize, Serialize};

use crate::identity::RuleId;
use crate::level::{Priority, RequirementLevel, RiskLevel, Severity};
use crate::rule::GapStatus;
use crate::taxonomy::{Regulation, RuleCategory};
use crate::temporal::Timestamp;

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

/// A single detected compliance issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// What the finding concerns (e.g., "Privacy Policy", "Data Mapping").
    pub category: String,
    /// How severe the issue is.
    pub severity: Severity,
    /// What was detected.
    pub description: String,
    /// Why it matters — the regulatory or business impact.
    pub impact: String,
}

impl Finding {
    /// Construct a finding.
    pub fn new(
        category: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            severity,
            description: description.into(),
            impact: impact.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// A prioritized remediation recommendation with concrete action items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// How urgently the work should be scheduled.
    pub priority: Priority,
    /// Short headline.
    pub title: String,
    /// What to do and why.
    pub description: String,
    /// Ordered, concrete steps.
    pub action_items: Vec<String>,
    /// Rough effort estimate (e.g., "2-4 hours", "1-2 days").
    pub estimated_effort: String,
}

// ---------------------------------------------------------------------------
// ComplianceGap
// ---------------------------------------------------------------------------

/// The delta between one regulatory rule's requirement and a merchant's
/// current implementation state.
///
/// Computed per (merchant, rule) pair at gap-analysis time; carries enough
/// of the rule to render without a second catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceGap {
    /// The rule this gap measures against.
    pub rule_id: RuleId,
    /// The rule's title, denormalized for rendering.
    pub rule_title: String,
    /// The regulation the rule belongs to.
    pub regulation: Regulation,
    /// The rule's category.
    pub category: RuleCategory,
    /// The rule's requirement level (drives weight and deadline).
    pub requirement: RequirementLevel,
    /// Current implementation status against the rule.
    pub status: GapStatus,
    /// Risk classification, after any mandatory-non-compliant escalation.
    pub risk_level: RiskLevel,
    /// What the merchant must do to close the gap.
    pub action: String,
    /// Remediation deadline; `None` when already compliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_new() {
        let f = Finding::new(
            "Privacy Policy",
            Severity::Critical,
            "No privacy policy found",
            "Operating without a privacy policy violates GDPR Art. 13",
        );
        assert_eq!(f.category, "Privacy Policy");
        assert_eq!(f.severity, Severity::Critical);
    }

    #[test]
    fn test_recommendation_serde_roundtrip() {
        let rec = Recommendation {
            priority: Priority::High,
            title: "Map data collection".to_string(),
            description: "Document every place personal data enters".to_string(),
            action_items: vec![
                "Inventory checkout fields".to_string(),
                "Inventory marketing forms".to_string(),
            ],
            estimated_effort: "1-2 days".to_string(),
        };
        let json = serde_json::to_string(&rec).unwrap();
        let parsed: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rec);
    }

    #[test]
    fn test_gap_deadline_omitted_when_none() {
        let gap = ComplianceGap {
            rule_id: RuleId::new(),
            rule_title: "Publish a privacy policy".to_string(),
            regulation: Regulation::Gdpr,
            category: RuleCategory::PrivacyPolicy,
            requirement: RequirementLevel::Mandatory,
            status: GapStatus::Compliant,
            risk_level: RiskLevel::Low,
            action: "No action required".to_string(),
            deadline: None,
        };
        let json = serde_json::to_string(&gap).unwrap();
        assert!(!json.contains("deadline"));
    }
}
