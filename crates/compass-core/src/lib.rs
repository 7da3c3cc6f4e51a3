//! # compass-core — Foundational Types for Merchant Compliance Compass
//!
//! This crate is the bedrock of the Compass workspace. It defines the
//! type-system primitives that the scoring engines are built on. Every other
//! crate in the workspace depends on `compass-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `MerchantId`, `AppId`,
//!    `RuleId`, `AuditId`, `AlertId`, `Jurisdiction` — all newtypes.
//!    No bare strings or raw UUIDs for identifiers.
//!
//! 2. **Closed enumerations for every classification.** `Severity`,
//!    `RiskLevel`, `Priority`, `RequirementLevel`, and the status enums are
//!    closed Rust enums with exhaustive `match` everywhere. A severity value
//!    outside the fixed set is unrepresentable.
//!
//! 3. **`Score` newtype clamps at construction.** All engine outputs flow
//!    through `Score`, so a value outside [0,100] cannot escape the crate.
//!
//! 4. **UTC-only timestamps.** `Timestamp` enforces UTC with seconds
//!    precision; deadline and staleness arithmetic lives on the type.
//!
//! 5. **Pure scoring primitives.** Weight tables, risk thresholds, and
//!    deadline computation are free functions with `now` passed explicitly —
//!    independently unit-testable, no hidden clock reads.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `compass-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod app;
pub mod error;
pub mod finding;
pub mod identity;
pub mod level;
pub mod merchant;
pub mod rule;
pub mod score;
pub mod scoring;
pub mod taxonomy;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use app::{
    AppComplianceGap, AppRiskAssessment, DataAccessLevel, EncryptionStatus, RiskBreakdown,
    RiskFactor, ThirdPartyApp,
};
pub use error::CompassError;
pub use finding::{ComplianceGap, Finding, Recommendation};
pub use identity::{AlertId, AppId, AuditId, Jurisdiction, MerchantId, RuleId};
pub use level::{Priority, RequirementLevel, RiskLevel, Severity};
pub use merchant::{ComplianceStatus, DataCollectionPoint, MerchantProfile, PrivacyPolicy};
pub use rule::{GapStatus, RegulatoryRule, RuleApplicability};
pub use score::Score;
pub use scoring::remediation_deadline;
pub use taxonomy::{BusinessType, DataType, Regulation, RuleCategory};
pub use temporal::Timestamp;
