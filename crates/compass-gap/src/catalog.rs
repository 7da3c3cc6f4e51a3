//! # Seed Rule Catalog
//!
//! The built-in regulatory rule set loaded at install time. Administrators
//! extend or deactivate entries; the analyzer only ever reads them.

use compass_core::{
    Jurisdiction, Regulation, RegulatoryRule, RequirementLevel, RuleApplicability, RuleCategory,
    RuleId,
};

fn rule(
    regulation: Regulation,
    category: RuleCategory,
    title: &str,
    legal_reference: &str,
    requirement: RequirementLevel,
    jurisdictions: &[&str],
    penalty: &str,
) -> RegulatoryRule {
    RegulatoryRule {
        id: RuleId::new(),
        regulation,
        category,
        title: title.to_string(),
        legal_reference: legal_reference.to_string(),
        requirement,
        applicability: RuleApplicability {
            jurisdictions: jurisdictions.iter().map(|j| Jurisdiction::new(*j)).collect(),
            ..RuleApplicability::any()
        },
        penalty: penalty.to_string(),
        active: true,
    }
}

/// The seed catalog: GDPR, CCPA, and PIPEDA baseline rules.
pub fn seed_rules() -> Vec<RegulatoryRule> {
    vec![
        rule(
            Regulation::Gdpr,
            RuleCategory::PrivacyPolicy,
            "Publish a privacy notice",
            "GDPR Art. 13-14",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "Up to EUR 20M or 4% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::ConsentManagement,
            "Obtain valid consent before processing",
            "GDPR Art. 7",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "Up to EUR 20M or 4% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::CookieManagement,
            "Tracking consent before non-essential cookies",
            "ePrivacy Directive Art. 5(3)",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "National ePrivacy fines",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::DataSubjectRights,
            "Fulfil access and erasure requests within one month",
            "GDPR Art. 12, 15-17",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "Up to EUR 20M or 4% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::DataRetention,
            "Define and enforce retention schedules",
            "GDPR Art. 5(1)(e)",
            RequirementLevel::Recommended,
            &["EU", "UK"],
            "Up to EUR 10M or 2% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::DataSecurity,
            "Appropriate technical and organizational measures",
            "GDPR Art. 32",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "Up to EUR 10M or 2% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::BreachNotification,
            "Notify the supervisory authority within 72 hours",
            "GDPR Art. 33",
            RequirementLevel::Mandatory,
            &["EU", "UK"],
            "Up to EUR 10M or 2% of global turnover",
        ),
        rule(
            Regulation::Gdpr,
            RuleCategory::VendorManagement,
            "Data processing agreements with processors",
            "GDPR Art. 28",
            RequirementLevel::Recommended,
            &["EU", "UK"],
            "Up to EUR 10M or 2% of global turnover",
        ),
        rule(
            Regulation::Ccpa,
            RuleCategory::PrivacyPolicy,
            "Notice at collection and privacy policy",
            "CCPA \u{a7}1798.100",
            RequirementLevel::Mandatory,
            &["US-CA"],
            "Up to $7,500 per intentional violation",
        ),
        rule(
            Regulation::Ccpa,
            RuleCategory::ConsentManagement,
            "Honor opt-out of sale or sharing",
            "CCPA \u{a7}1798.120",
            RequirementLevel::Mandatory,
            &["US-CA"],
            "Up to $7,500 per intentional violation",
        ),
        rule(
            Regulation::Ccpa,
            RuleCategory::DataSubjectRights,
            "Respond to consumer requests within 45 days",
            "CCPA \u{a7}1798.130",
            RequirementLevel::Mandatory,
            &["US-CA"],
            "Up to $2,500 per violation",
        ),
        rule(
            Regulation::Pipeda,
            RuleCategory::ConsentManagement,
            "Meaningful consent for collection and use",
            "PIPEDA Principle 3",
            RequirementLevel::Mandatory,
            &["CA"],
            "Up to CAD 100,000 per violation",
        ),
        rule(
            Regulation::Pipeda,
            RuleCategory::PrivacyPolicy,
            "Openness about data-handling practices",
            "PIPEDA Principle 8",
            RequirementLevel::Recommended,
            &["CA"],
            "Up to CAD 100,000 per violation",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_rules_all_active() {
        let rules = seed_rules();
        assert!(!rules.is_empty());
        assert!(rules.iter().all(|r| r.active));
    }

    #[test]
    fn test_seed_rules_have_distinct_ids() {
        let rules = seed_rules();
        let mut ids: Vec<_> = rules.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_gdpr_rules_scoped_to_eu_and_uk() {
        for r in seed_rules().iter().filter(|r| r.regulation == Regulation::Gdpr) {
            assert!(r.applicability.jurisdictions.contains(&Jurisdiction::new("EU")));
        }
    }
}
