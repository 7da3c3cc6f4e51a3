//! # compass-audit — Audit Check Pipeline
//!
//! Runs the four-check compliance audit over a merchant's stored state:
//! policy existence/publication, data-mapping completeness, legal-basis
//! coverage, and retention coverage. Each check contributes a flat score
//! deduction; the pipeline folds them into one bounded score, a tri-state
//! compliance status, and a persisted audit record.

pub mod checks;
pub mod pipeline;

pub use checks::{AuditResult, CheckOutcome};
pub use pipeline::run_audit;
