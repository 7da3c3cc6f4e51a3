//! # Severity, Risk, Priority, and Requirement Taxonomies
//!
//! The four closed classification enums that every scoring engine emits.
//! Each is a closed Rust enum with exhaustive `match` everywhere — a value
//! outside the fixed set is unrepresentable, which is the invariant the data
//! model demands ("no other values are ever produced").
//!
//! The numeric companions live here too: `RequirementLevel::weight()` for
//! weighted-maximum scoring, `RiskLevel::rank()` for sort order, and
//! `RiskLevel::from_score()` for thresholding a composite score.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CompassError;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a single detected compliance issue (a finding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic or informational issue.
    Low,
    /// Issue that should be addressed in the normal course of work.
    Medium,
    /// Issue with material regulatory exposure.
    High,
    /// Issue that blocks compliance outright.
    Critical,
}

impl Severity {
    /// The snake_case string identifier for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CompassError::Validation(format!(
                "unknown severity: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Risk classification derived from a numeric score or assigned by a
/// gap-classification branch.
///
/// Distinct from [`Severity`]: severity describes a single finding, risk
/// level describes an entity (a gap, an app, a fleet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Negligible exposure.
    Low,
    /// Moderate exposure, monitor.
    Medium,
    /// Material exposure, remediate soon.
    High,
    /// Severe exposure, remediate immediately.
    Critical,
}

impl RiskLevel {
    /// Ordering rank: Critical 4, High 3, Medium 2, Low 1.
    ///
    /// Used for sorting and tie-breaking only — ranks are never summed
    /// into a score.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Threshold a composite score into a risk level.
    ///
    /// Fixed inclusive lower bounds: ≥80 Critical, ≥60 High, ≥40 Medium,
    /// else Low. Shared by the app risk model and every caller that turns
    /// a [0,100] risk score into a tier.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Self::Critical,
            s if s >= 60 => Self::High,
            s if s >= 40 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Bump this risk level exactly one step up the ordered scale,
    /// saturating at Critical.
    ///
    /// The gap analyzer applies this when a mandatory rule evaluates
    /// non-compliant.
    pub fn escalate(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Critical,
        }
    }

    /// The snake_case string identifier for this risk level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CompassError::Validation(format!(
                "unknown risk level: {other:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Address when convenient.
    Low,
    /// Address in the current planning cycle.
    Medium,
    /// Address ahead of other work.
    High,
    /// Address immediately.
    Urgent,
}

impl Priority {
    /// The snake_case string identifier for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RequirementLevel
// ---------------------------------------------------------------------------

/// Mandatory/recommended/optional classification of a regulatory rule,
/// driving its scoring weight and remediation deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    /// Legally required — weight 10.
    Mandatory,
    /// Strongly advised by regulators — weight 5.
    Recommended,
    /// Best practice — weight 1.
    Optional,
}

impl RequirementLevel {
    /// Scoring weight: Mandatory 10, Recommended 5, Optional 1.
    ///
    /// A rule's contribution to the weighted maximum in gap analysis.
    pub fn weight(&self) -> u32 {
        match self {
            Self::Mandatory => 10,
            Self::Recommended => 5,
            Self::Optional => 1,
        }
    }

    /// Whether this level is mandatory.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::Mandatory)
    }

    /// The snake_case string identifier for this requirement level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mandatory => "mandatory",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl std::fmt::Display for RequirementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
