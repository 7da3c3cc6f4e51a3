//! # compass-apps — Third-Party App Risk Model
//!
//! Scores each installed app from five weighted sub-factors (data access,
//! permissions, compliance posture, security posture, developer reputation),
//! thresholds the composite into a risk tier, and aggregates the fleet into
//! one assessment with breakdown, recommendations, and cross-app gaps.

pub mod assessment;
pub mod factors;
pub mod weights;

pub use assessment::{assess_risk, score_app, AppScorecard};
pub use factors::{analyze_app, FactorOutcome, HIGH_RISK_SCOPE_PATTERNS};
pub use weights::{RiskModelConfig, RiskWeights};
