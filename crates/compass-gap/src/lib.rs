//! # compass-gap — Regulatory Gap Analyzer
//!
//! Matches a merchant profile against the regulatory rule catalog:
//! applicability filtering, category-specific gap classification,
//! mandatory-gap risk escalation, a weighted compliance score, and a
//! capped list of priority actions with remediation deadlines.

pub mod analyzer;
pub mod catalog;

pub use analyzer::{analyze, gap_analysis, GapAnalysis};
pub use catalog::seed_rules;
