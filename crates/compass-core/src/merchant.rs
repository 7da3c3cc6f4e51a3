//! # Merchant State
//!
//! The merchant profile plus the two pieces of stored state the audit
//! pipeline evaluates: privacy policies and data-collection points.
//!
//! ## Mutation Discipline
//!
//! `MerchantProfile::compliance_score` and `compliance_status` are mutated
//! only by the audit pipeline after a completed run — never by the gap
//! analyzer, app risk model, or monitor, which return their results to the
//! caller instead.

use serde::{Deserialize, Serialize};

use crate::identity::{Jurisdiction, MerchantId};
use crate::score::Score;
use crate::taxonomy::{BusinessType, DataType};
use crate::temporal::Timestamp;

// ---------------------------------------------------------------------------
// ComplianceStatus
// ---------------------------------------------------------------------------

/// A merchant's overall compliance standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Newly onboarded, no audit has completed yet.
    Pending,
    /// Latest audit scored ≥80.
    Compliant,
    /// Latest audit scored below 60.
    NonCompliant,
    /// Latest audit scored 60–79; remediation in progress.
    UnderReview,
}

impl ComplianceStatus {
    /// Derive a status from an audit compliance score.
    ///
    /// ≥80 → Compliant, ≥60 → UnderReview, else NonCompliant. `Pending`
    /// is never derived — it only exists before the first audit.
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            s if s >= 80 => Self::Compliant,
            s if s >= 60 => Self::UnderReview,
            _ => Self::NonCompliant,
        }
    }

    /// The snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::UnderReview => "under_review",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MerchantProfile
// ---------------------------------------------------------------------------

/// A merchant tenant's compliance-relevant profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantProfile {
    /// Tenant identifier.
    pub id: MerchantId,
    /// Display name of the shop.
    pub shop_name: String,
    /// Line of business, used by rule applicability.
    pub business_type: BusinessType,
    /// Primary regulatory jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// Categories of personal data the merchant processes.
    pub data_types: Vec<DataType>,
    /// Control keys the merchant has implemented
    /// (e.g., `"consent_management"`, `"dsar_workflow"`).
    pub implemented_controls: Vec<String>,
    /// Identifiers of currently published policies
    /// (e.g., `"privacy_policy"`, `"cookie_policy"`).
    pub current_policies: Vec<String>,
    /// Running compliance score, written back by the audit pipeline.
    pub compliance_score: Score,
    /// Overall standing, written back by the audit pipeline.
    pub compliance_status: ComplianceStatus,
    /// When the merchant was onboarded.
    pub created_at: Timestamp,
}

impl MerchantProfile {
    /// Whether a control key is implemented.
    pub fn has_control(&self, key: &str) -> bool {
        self.implemented_controls.iter().any(|c| c == key)
    }

    /// Whether a policy identifier is present.
    pub fn has_policy(&self, key: &str) -> bool {
        self.current_policies.iter().any(|p| p == key)
    }
}

// ---------------------------------------------------------------------------
// PrivacyPolicy
// ---------------------------------------------------------------------------

/// A stored privacy-policy document for a merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyPolicy {
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// Policy document title.
    pub title: String,
    /// Whether the policy is published on the storefront.
    pub published: bool,
    /// When the policy document was created.
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DataCollectionPoint
// ---------------------------------------------------------------------------

/// One place the merchant collects personal data (checkout form, newsletter
/// signup, account registration, …).
///
/// `legal_basis` and `retention_period` are optional by design: their
/// absence is a finding for the audit pipeline, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCollectionPoint {
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// Where the data is collected (e.g., "checkout", "newsletter_signup").
    pub source: String,
    /// Data types collected at this point.
    pub data_types: Vec<DataType>,
    /// Declared legal basis (e.g., "consent", "contract"); absence is a
    /// critical finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_basis: Option<String>,
    /// Declared retention period (e.g., "24 months"); absence is a medium
    /// finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<String>,
}
