//! # Regulatory Taxonomy — Single Source of Truth
//!
//! Defines the closed enumerations that classify regulatory rules and
//! merchant characteristics: `Regulation`, `RuleCategory`, `BusinessType`,
//! and `DataType`. Each is the ONE definition used across the workspace —
//! every `match` on `RuleCategory` must be exhaustive, so adding a category
//! forces every consumer (most importantly the gap analyzer's
//! classification) to handle it at compile time.
//!
//! The gap analyzer's per-category dispatch is deliberately an exhaustive
//! match over this enum rather than open-ended string dispatch: the set of
//! handled categories is statically verifiable.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CompassError;

// ---------------------------------------------------------------------------
// Regulation
// ---------------------------------------------------------------------------

/// A privacy regulation the catalog carries rules for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regulation {
    /// EU General Data Protection Regulation.
    Gdpr,
    /// California Consumer Privacy Act (as amended by CPRA).
    Ccpa,
    /// Canada's Personal Information Protection and Electronic Documents Act.
    Pipeda,
    /// Brazil's Lei Geral de Proteção de Dados.
    Lgpd,
    /// UK GDPR (post-Brexit retained regulation).
    UkGdpr,
}

impl Regulation {
    /// All regulations in canonical order.
    pub fn all() -> &'static [Regulation] {
        &[
            Self::Gdpr,
            Self::Ccpa,
            Self::Pipeda,
            Self::Lgpd,
            Self::UkGdpr,
        ]
    }

    /// The snake_case string identifier for this regulation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdpr",
            Self::Ccpa => "ccpa",
            Self::Pipeda => "pipeda",
            Self::Lgpd => "lgpd",
            Self::UkGdpr => "uk_gdpr",
        }
    }
}

impl std::fmt::Display for Regulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RuleCategory
// ---------------------------------------------------------------------------

/// The compliance category a regulatory rule belongs to.
///
/// The gap analyzer switches on this enum to pick category-specific
/// classification logic. Categories without dedicated logic fall through to
/// the generic control-key check — but that fallthrough is an explicit match
/// arm, not a string-dispatch default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Published privacy policy requirements.
    PrivacyPolicy,
    /// Consent capture and withdrawal mechanics.
    ConsentManagement,
    /// Cookie banners and tracking consent.
    CookieManagement,
    /// Data-subject request handling (access, erasure, portability, …).
    DataSubjectRights,
    /// Retention schedules and deletion.
    DataRetention,
    /// Technical and organizational security measures.
    DataSecurity,
    /// Breach notification duties.
    BreachNotification,
    /// Processor/vendor oversight and data processing agreements.
    VendorManagement,
}

impl RuleCategory {
    /// All rule categories in canonical order.
    pub fn all() -> &'static [RuleCategory] {
        &[
            Self::PrivacyPolicy,
            Self::ConsentManagement,
            Self::CookieManagement,
            Self::DataSubjectRights,
            Self::DataRetention,
            Self::DataSecurity,
            Self::BreachNotification,
            Self::VendorManagement,
        ]
    }

    /// The snake_case string identifier for this category.
    ///
    /// Doubles as the implemented-control key the generic classification
    /// branch checks on the merchant profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => "privacy_policy",
            Self::ConsentManagement => "consent_management",
            Self::CookieManagement => "cookie_management",
            Self::DataSubjectRights => "data_subject_rights",
            Self::DataRetention => "data_retention",
            Self::DataSecurity => "data_security",
            Self::BreachNotification => "breach_notification",
            Self::VendorManagement => "vendor_management",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCategory {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "privacy_policy" => Ok(Self::PrivacyPolicy),
            "consent_management" => Ok(Self::ConsentManagement),
            "cookie_management" => Ok(Self::CookieManagement),
            "data_subject_rights" => Ok(Self::DataSubjectRights),
            "data_retention" => Ok(Self::DataRetention),
            "data_security" => Ok(Self::DataSecurity),
            "breach_notification" => Ok(Self::BreachNotification),
            "vendor_management" => Ok(Self::VendorManagement),
            other => Err(CompassError::Validation(format!(
                "unknown rule category: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// BusinessType
// ---------------------------------------------------------------------------

/// The merchant's line of business, used by rule applicability conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    /// General physical-goods retail.
    Retail,
    /// Digital goods and downloads.
    DigitalGoods,
    /// Recurring subscription commerce.
    Subscription,
    /// Marketplace hosting third-party sellers.
    Marketplace,
    /// Dropshipping storefront.
    Dropshipping,
}

impl BusinessType {
    /// The snake_case string identifier for this business type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::DigitalGoods => "digital_goods",
            Self::Subscription => "subscription",
            Self::Marketplace => "marketplace",
            Self::Dropshipping => "dropshipping",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataType
// ---------------------------------------------------------------------------

/// A category of personal data a merchant processes.
///
/// Rule applicability intersects these with a rule's data-type conditions;
/// the app risk model treats `Personal` and `Payment` as sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Directly identifying personal data (names, emails, addresses).
    Personal,
    /// Payment instruments and transaction data.
    Payment,
    /// Behavioral/analytics data (browsing, preferences).
    Behavioral,
    /// Device and technical identifiers (IP, fingerprints).
    Device,
    /// Location data.
    Location,
}

impl DataType {
    /// Whether this data type is sensitive for app-risk purposes.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Personal | Self::Payment)
    }

    /// The snake_case string identifier for this data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Payment => "payment",
            Self::Behavioral => "behavioral",
            Self::Device => "device",
            Self::Location => "location",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
