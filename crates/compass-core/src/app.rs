//! # Third-Party Apps
//!
//! The installed-app entity the risk model assesses. App metadata comes
//! from store scans; unknown optional fields (`privacy_policy_url`,
//! `retention_period`, `encryption`, `developer`) are degraded input —
//! the risk model turns their absence into findings, never errors.

use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use crate::identity::{AppId, MerchantId};
use crate::level::RiskLevel;
use crate::score::Score;
use crate::taxonomy::DataType;
use crate::temporal::Timestamp;

// ---------------------------------------------------------------------------
// DataAccessLevel
// ---------------------------------------------------------------------------

/// How much merchant data an app's grant reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAccessLevel {
    /// No data access declared.
    None,
    /// Read-only access.
    ReadOnly,
    /// Read-write access.
    ReadWrite,
    /// Unrestricted access to all merchant data.
    Full,
}

impl DataAccessLevel {
    /// The snake_case string identifier for this access level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReadOnly => "read_only",
            Self::ReadWrite => "read_write",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for DataAccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EncryptionStatus
// ---------------------------------------------------------------------------

/// What an app declares about encryption of merchant data at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionStatus {
    /// Data encrypted at rest per the app's declaration.
    Encrypted,
    /// Data explicitly declared unencrypted.
    Unencrypted,
    /// No declaration available — treated as a security finding.
    Unknown,
}

// ---------------------------------------------------------------------------
// ThirdPartyApp
// ---------------------------------------------------------------------------

/// A third-party app installed by a merchant, with the risk fields the
/// assessment step refreshes in place.
///
/// ## Lifecycle
///
/// App records are re-created on each scan (prior records for the merchant
/// are deleted); `risk_level`, `risk_score`, `compliance_issues`, and
/// `last_assessed` are overwritten by [`assess_risk`] runs.
///
/// [`assess_risk`]: https://docs.rs/compass-apps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThirdPartyApp {
    /// App identifier.
    pub id: AppId,
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// App display name.
    pub name: String,
    /// Marketplace category (e.g., "marketing", "analytics").
    pub category: String,
    /// Declared OAuth permission scopes.
    pub permission_scopes: Vec<String>,
    /// Derived data-access level.
    pub data_access: DataAccessLevel,
    /// Data types the app reaches.
    pub data_types: Vec<DataType>,
    /// The app's privacy policy URL, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    /// The app's declared retention period, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<String>,
    /// Declared encryption posture.
    pub encryption: EncryptionStatus,
    /// Developer name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    /// Risk tier from the latest assessment.
    pub risk_level: RiskLevel,
    /// Composite risk score from the latest assessment.
    pub risk_score: Score,
    /// Findings from the latest assessment, kept unresolved on the record.
    pub compliance_issues: Vec<Finding>,
    /// When the app was last assessed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_assessed: Option<Timestamp>,
}

impl ThirdPartyApp {
    /// Whether the app reaches any sensitive data type (personal/payment).
    pub fn touches_sensitive_data(&self) -> bool {
        self.data_types.iter().any(|d| d.is_sensitive())
    }

    /// Whether the developer field is missing or the marketplace's literal
    /// "Unknown Developer" placeholder.
    pub fn developer_unknown(&self) -> bool {
        match self.developer.as_deref() {
            None => true,
            Some(name) => name == "Unknown Developer",
        }
    }
}

// ---------------------------------------------------------------------------
// RiskFactor / RiskBreakdown
// ---------------------------------------------------------------------------

/// The five sub-factors of the app risk composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// Breadth of data the app reaches.
    DataAccess,
    /// Scope of requested permissions.
    Permissions,
    /// Privacy-compliance posture (policy URL, retention disclosure).
    Compliance,
    /// Security posture (encryption declaration).
    Security,
    /// Developer reputation.
    Reputation,
}

impl RiskFactor {
    /// All factors in canonical (weight-table) order.
    pub fn all() -> &'static [RiskFactor] {
        &[
            Self::DataAccess,
            Self::Permissions,
            Self::Compliance,
            Self::Security,
            Self::Reputation,
        ]
    }
}

/// Per-factor contribution breakdown of a fleet risk score.
///
/// Descriptive only: by construction the components sum close to, but not
/// exactly, the overall risk score (see the assessment docs in
/// `compass-apps`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// Data-access contribution.
    pub data_access: u8,
    /// Permission-scope contribution.
    pub permissions: u8,
    /// Compliance-posture contribution.
    pub compliance: u8,
    /// Security-posture contribution.
    pub security: u8,
    /// Developer-reputation contribution.
    pub reputation: u8,
}

// ---------------------------------------------------------------------------
// AppComplianceGap / AppRiskAssessment
// ---------------------------------------------------------------------------

/// A cross-app compliance gap shared by several apps (e.g., missing data
/// processing agreements). Not rule-linked — this is fleet-level evidence,
/// distinct from the catalog-driven [`ComplianceGap`](crate::ComplianceGap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppComplianceGap {
    /// The gap area (e.g., "Data Processing Agreements").
    pub area: String,
    /// What is missing and why it matters.
    pub description: String,
    /// Risk classification of the shared gap.
    pub risk_level: RiskLevel,
    /// Names of the apps affected.
    pub affected_apps: Vec<String>,
}

/// A fleet-level risk assessment across a merchant's installed apps.
///
/// One record is created per assessment run; prior records are retained as
/// history (the store appends, never overwrites).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRiskAssessment {
    /// The merchant whose fleet was assessed.
    pub merchant_id: MerchantId,
    /// Total apps assessed.
    pub total_apps: usize,
    /// Apps in the High or Critical tier (counted together).
    pub high_risk_apps: usize,
    /// Apps in the Medium tier.
    pub medium_risk_apps: usize,
    /// Apps in the Low tier.
    pub low_risk_apps: usize,
    /// Rounded mean of per-app risk scores; 0 when no apps.
    pub overall_risk_score: Score,
    /// Per-factor breakdown of the overall score.
    pub risk_breakdown: RiskBreakdown,
    /// Cross-app recommendations (e.g., replacing high-risk apps).
    pub recommendations: Vec<crate::Recommendation>,
    /// Cross-app compliance gaps.
    pub gaps: Vec<AppComplianceGap>,
    /// When the assessment ran.
    pub assessed_at: Timestamp,
}
