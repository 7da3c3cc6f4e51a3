//! # compass-state — Lifecycle State Machines
//!
//! Encodes the two record lifecycles the data model constrains:
//!
//! - **Audit** (`audit.rs`): `Processing → Completed | Failed`. A record is
//!   created at audit start and mutated exactly once to a terminal status;
//!   re-opening or double-completing is a structured error, not a silent
//!   overwrite.
//!
//! - **Alert** (`alert.rs`): `Active → Acknowledged | Resolved | Dismissed`.
//!   Transitions are strictly forward and each one stamps the acting user
//!   and a timestamp.
//!
//! ## Crate Policy
//!
//! - Depends only on `compass-core`.
//! - Invalid transitions return errors carrying the from/to states —
//!   callers get enough context to log and reject without re-reading state.

pub mod alert;
pub mod audit;

pub use alert::{Alert, AlertError, AlertStatus, NewAlert};
pub use audit::{AuditError, AuditStatus, ComplianceAudit};
