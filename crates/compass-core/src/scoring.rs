//! # Scoring Primitives
//!
//! The pure functions the scoring engines share. Weight and rank live as
//! methods on their enums ([`RequirementLevel::weight`],
//! [`RiskLevel::rank`], [`RiskLevel::from_score`]); the remediation-deadline
//! computation lives here because it crosses two taxonomies.
//!
//! All primitives are pure: `now` is an explicit parameter, never an
//! ambient clock read.
//!
//! [`RequirementLevel::weight`]: crate::level::RequirementLevel::weight
//! [`RiskLevel::rank`]: crate::level::RiskLevel::rank
//! [`RiskLevel::from_score`]: crate::level::RiskLevel::from_score

use crate::level::RequirementLevel;
use crate::rule::GapStatus;
use crate::temporal::Timestamp;

/// Days allowed to remediate a non-compliant mandatory requirement.
pub const MANDATORY_NON_COMPLIANT_DAYS: i64 = 15;
/// Days allowed to remediate a partially-met mandatory requirement.
pub const MANDATORY_PARTIAL_DAYS: i64 = 30;
/// Days allowed to remediate any non-mandatory gap.
pub const NON_MANDATORY_DAYS: i64 = 60;

/// Compute the remediation deadline for a gap.
///
/// - Compliant gaps have no deadline.
/// - Mandatory requirements: 15 days when non-compliant, 30 when partial.
/// - Recommended/optional requirements: 60 days regardless of how far
///   short the merchant falls.
pub fn remediation_deadline(
    requirement: RequirementLevel,
    status: GapStatus,
    now: Timestamp,
) -> Option<Timestamp> {
    match (requirement, status) {
        (_, GapStatus::Compliant) => None,
        (RequirementLevel::Mandatory, GapStatus::NonCompliant) => {
            Some(now.plus_days(MANDATORY_NON_COMPLIANT_DAYS))
        }
        (RequirementLevel::Mandatory, GapStatus::Partial) => {
            Some(now.plus_days(MANDATORY_PARTIAL_DAYS))
        }
        (RequirementLevel::Recommended | RequirementLevel::Optional, _) => {
            Some(now.plus_days(NON_MANDATORY_DAYS))
        }
    }
}
