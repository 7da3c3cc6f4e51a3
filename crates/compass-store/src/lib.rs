//! # compass-store — Persistence & Alerting Boundary
//!
//! The scoring engines are pure/near-pure functions over already-fetched
//! state; this crate defines the async boundary they fetch it across.
//!
//! - [`ComplianceStore`] — the persistence collaborator: reads of merchant
//!   state and writes of audit/assessment results. Production deployments
//!   put a relational store behind this trait; it is out of scope here.
//! - [`AlertSink`] — fire-and-forget alert creation. The engines await the
//!   enqueue result only; delivery guarantees are the sink's problem.
//! - [`MemoryStore`] — an in-memory implementation of both traits used by
//!   tests and local runs, with failure injection for exercising the audit
//!   failure path.
//!
//! ## Concurrency Note
//!
//! The store does not guard against concurrent audit runs for the SAME
//! merchant: two in-flight audits race on the merchant's compliance score
//! with last-write-wins semantics. Callers that need the stronger guarantee
//! serialize per-merchant runs themselves.

pub mod memory;
pub mod store;

pub use memory::{BreachIncident, ConsentWithdrawal, DataSubjectRequest, MemoryStore};
pub use store::{AlertCounts, AlertSink, ComplianceStore};
