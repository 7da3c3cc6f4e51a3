//! # Regulatory Rules
//!
//! The catalog entry type the gap analyzer consumes, its applicability
//! conditions, and the tri-state gap status. Rules are seeded or updated by
//! administrators and are strictly read-only during scoring.

use serde::{Deserialize, Serialize};

use crate::identity::{Jurisdiction, RuleId};
use crate::level::RequirementLevel;
use crate::taxonomy::{BusinessType, DataType, Regulation, RuleCategory};

// ---------------------------------------------------------------------------
// GapStatus
// ---------------------------------------------------------------------------

/// How a merchant's current implementation measures against one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// The rule's requirement is met.
    Compliant,
    /// Partially met — some evidence exists, more is required.
    Partial,
    /// Not met.
    NonCompliant,
}

impl GapStatus {
    /// The snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Partial => "partial",
            Self::NonCompliant => "non_compliant",
        }
    }
}

impl std::fmt::Display for GapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RuleApplicability
// ---------------------------------------------------------------------------

/// Conditions under which a rule applies to a merchant.
///
/// An EMPTY list means the condition is unconstrained — absence of a
/// condition never excludes a rule. A populated list must contain a match
/// (for data types: a non-empty intersection with the profile).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleApplicability {
    /// Business types this rule applies to; empty = all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub business_types: Vec<BusinessType>,
    /// Jurisdictions this rule applies to; empty = all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisdictions: Vec<Jurisdiction>,
    /// Data types this rule applies to; empty = all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_types: Vec<DataType>,
    /// Optional minimum monthly order volume before the rule applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_monthly_orders: Option<u64>,
}

impl RuleApplicability {
    /// An applicability that matches every merchant.
    pub fn any() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// RegulatoryRule
// ---------------------------------------------------------------------------

/// One entry in the regulatory rule catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryRule {
    /// Catalog identifier.
    pub id: RuleId,
    /// The regulation this rule implements.
    pub regulation: Regulation,
    /// The compliance category driving gap classification.
    pub category: RuleCategory,
    /// Human-readable rule title.
    pub title: String,
    /// Legal reference (e.g., "GDPR Art. 13", "CCPA §1798.100").
    pub legal_reference: String,
    /// Mandatory/recommended/optional — drives scoring weight and deadlines.
    pub requirement: RequirementLevel,
    /// Conditions under which the rule applies.
    pub applicability: RuleApplicability,
    /// Summary of the penalty regime for violations.
    pub penalty: String,
    /// Inactive rules are skipped by the analyzer.
    pub active: bool,
}
