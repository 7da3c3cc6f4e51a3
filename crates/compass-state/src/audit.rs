//! # Compliance Audit Lifecycle
//!
//! Models the audit record's lifecycle:
//!
//! ```text
//! Processing ──▶ Completed (terminal)
//!      │
//!      └──────▶ Failed (terminal)
//! ```
//!
//! ## Invariant
//!
//! Exactly one terminal mutation. An audit opened as `Processing` is
//! completed once (with results) or failed once (with the error payload);
//! any further transition attempt is an [`AuditError`]. Audits are never
//! re-opened.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use compass_core::{AuditId, Finding, MerchantId, Recommendation, Score, Timestamp};

// ─── Audit Status ────────────────────────────────────────────────────

/// The lifecycle status of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Audit is running; no results yet.
    Processing,
    /// Audit finished with results (terminal).
    Completed,
    /// Audit aborted with an error payload (terminal).
    Failed,
}

impl AuditStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from audit lifecycle transitions.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The audit already reached a terminal status.
    #[error("audit {audit_id} already terminal in status {status}")]
    AlreadyTerminal {
        /// The audit that rejected the transition.
        audit_id: String,
        /// Its terminal status.
        status: String,
    },
}

// ─── ComplianceAudit ─────────────────────────────────────────────────

/// A compliance audit record for one merchant.
///
/// Created with [`ComplianceAudit::open`] in `Processing` status; mutated
/// exactly once via [`complete`](ComplianceAudit::complete) or
/// [`fail`](ComplianceAudit::fail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAudit {
    /// Audit identifier.
    pub id: AuditId,
    /// The merchant this audit evaluates.
    pub merchant_id: MerchantId,
    /// Lifecycle status.
    pub status: AuditStatus,
    /// Risk score (inverse of the compliance score); meaningful only once
    /// completed.
    pub risk_score: Score,
    /// Findings from the check pipeline.
    pub findings: Vec<Finding>,
    /// Recommendations from the check pipeline.
    pub recommendations: Vec<Recommendation>,
    /// Error message when the audit failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the audit was opened.
    pub started_at: Timestamp,
    /// When the audit reached a terminal status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl ComplianceAudit {
    /// Open a new audit in `Processing` status.
    pub fn open(merchant_id: MerchantId, started_at: Timestamp) -> Self {
        Self {
            id: AuditId::new(),
            merchant_id,
            status: AuditStatus::Processing,
            risk_score: Score::MIN,
            findings: Vec::new(),
            recommendations: Vec::new(),
            error: None,
            started_at,
            completed_at: None,
        }
    }

    /// Complete the audit with results (Processing → Completed).
    ///
    /// `risk_score` is the inverse of the compliance score the pipeline
    /// computed.
    pub fn complete(
        &mut self,
        risk_score: Score,
        findings: Vec<Finding>,
        recommendations: Vec<Recommendation>,
        completed_at: Timestamp,
    ) -> Result<(), AuditError> {
        self.require_open()?;
        self.status = AuditStatus::Completed;
        self.risk_score = risk_score;
        self.findings = findings;
        self.recommendations = recommendations;
        self.completed_at = Some(completed_at);
        Ok(())
    }

    /// Fail the audit with the upstream error message (Processing → Failed).
    pub fn fail(
        &mut self,
        error: impl Into<String>,
        failed_at: Timestamp,
    ) -> Result<(), AuditError> {
        self.require_open()?;
        self.status = AuditStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(failed_at);
        Ok(())
    }

    /// Whether the audit reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn require_open(&self) -> Result<(), AuditError> {
        if self.status.is_terminal() {
            return Err(AuditError::AlreadyTerminal {
                audit_id: self.id.to_string(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::Severity;

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-01T12:00:00Z").unwrap()
    }

    fn open_audit() -> ComplianceAudit {
        ComplianceAudit::open(MerchantId::new(), now())
    }

    #[test]
    fn test_open_starts_processing() {
        let audit = open_audit();
        assert_eq!(audit.status, AuditStatus::Processing);
        assert!(!audit.is_terminal());
        assert!(audit.completed_at.is_none());
        assert!(audit.error.is_none());
    }

    #[test]
    fn test_complete_records_results() {
        let mut audit = open_audit();
        let findings = vec![Finding::new(
            "Privacy Policy",
            Severity::Critical,
            "No privacy policy found",
            "Violates GDPR Art. 13",
        )];
        audit
            .complete(Score::clamped(55), findings.clone(), vec![], now())
            .unwrap();
        assert_eq!(audit.status, AuditStatus::Completed);
        assert_eq!(audit.risk_score.value(), 55);
        assert_eq!(audit.findings, findings);
        assert!(audit.is_terminal());
        assert_eq!(audit.completed_at, Some(now()));
    }

    #[test]
    fn test_fail_records_error() {
        let mut audit = open_audit();
        audit.fail("store unavailable", now()).unwrap();
        assert_eq!(audit.status, AuditStatus::Failed);
        assert_eq!(audit.error.as_deref(), Some("store unavailable"));
        assert!(audit.is_terminal());
    }

    #[test]
    fn test_cannot_complete_twice() {
        let mut audit = open_audit();
        audit.complete(Score::MIN, vec![], vec![], now()).unwrap();
        let result = audit.complete(Score::MAX, vec![], vec![], now());
        assert!(result.is_err());
    }

    #[test]
    fn test_cannot_fail_after_complete() {
        let mut audit = open_audit();
        audit.complete(Score::MIN, vec![], vec![], now()).unwrap();
        assert!(audit.fail("late failure", now()).is_err());
        // The completed results were not clobbered.
        assert_eq!(audit.status, AuditStatus::Completed);
        assert!(audit.error.is_none());
    }

    #[test]
    fn test_cannot_complete_after_fail() {
        let mut audit = open_audit();
        audit.fail("boom", now()).unwrap();
        assert!(audit.complete(Score::MAX, vec![], vec![], now()).is_err());
        assert_eq!(audit.status, AuditStatus::Failed);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut audit = open_audit();
        audit.fail("boom", now()).unwrap();
        let json = serde_json::to_string(&audit).unwrap();
        let parsed: ComplianceAudit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, AuditStatus::Failed);
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }
}
