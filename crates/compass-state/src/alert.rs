//! # Alert Lifecycle
//!
//! Models monitoring alerts raised by the detection components:
//!
//! ```text
//! Active ──▶ Acknowledged ──▶ Resolved (terminal)
//!   │              │
//!   │              └────────▶ Dismissed (terminal)
//!   ├──────▶ Resolved (terminal)
//!   └──────▶ Dismissed (terminal)
//! ```
//!
//! Transitions are strictly forward — a resolved or dismissed alert never
//! reactivates — and every transition stamps the acting user and a
//! timestamp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use compass_core::{AlertId, MerchantId, Severity, Timestamp};

// ─── Alert Status ────────────────────────────────────────────────────

/// The lifecycle status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// Raised and awaiting attention.
    Active,
    /// Seen by an operator; still open.
    Acknowledged,
    /// Underlying condition fixed (terminal).
    Resolved,
    /// Judged non-actionable (terminal).
    Dismissed,
}

impl AlertStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Dismissed)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from alert lifecycle transitions.
#[derive(Error, Debug)]
pub enum AlertError {
    /// Attempted transition is not valid from the current status.
    #[error("invalid alert transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },
}

// ─── NewAlert ────────────────────────────────────────────────────────

/// Payload for creating an alert through the alerting sink.
///
/// The detection components construct this; the sink assigns the id and
/// initial `Active` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    /// Machine-readable alert type (e.g., "audit_overdue", "data_breach").
    pub alert_type: String,
    /// Alert severity.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// What was detected.
    pub description: String,
    /// The merchant this alert concerns.
    pub merchant_id: MerchantId,
    /// Free-form metadata for the dashboard.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Optional expiry after which the alert auto-dismisses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

// ─── Alert ───────────────────────────────────────────────────────────

/// Stamp recording who moved an alert and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStamp {
    /// The acting user or system principal.
    pub actor: String,
    /// When the transition happened.
    pub at: Timestamp,
}

/// A monitoring alert with its lifecycle state and transition stamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Alert identifier.
    pub id: AlertId,
    /// Machine-readable alert type.
    pub alert_type: String,
    /// Alert severity.
    pub severity: Severity,
    /// Lifecycle status.
    pub status: AlertStatus,
    /// Short headline.
    pub title: String,
    /// What was detected.
    pub description: String,
    /// The merchant this alert concerns.
    pub merchant_id: MerchantId,
    /// Free-form metadata for the dashboard.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Optional expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    /// When the alert was raised.
    pub created_at: Timestamp,
    /// Stamp for the acknowledge transition, if taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<TransitionStamp>,
    /// Stamp for the resolve transition, if taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<TransitionStamp>,
    /// Stamp for the dismiss transition, if taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed: Option<TransitionStamp>,
}

impl Alert {
    /// Raise a new alert in `Active` status from a sink payload.
    pub fn raise(payload: NewAlert, created_at: Timestamp) -> Self {
        Self {
            id: AlertId::new(),
            alert_type: payload.alert_type,
            severity: payload.severity,
            status: AlertStatus::Active,
            title: payload.title,
            description: payload.description,
            merchant_id: payload.merchant_id,
            metadata: payload.metadata,
            expires_at: payload.expires_at,
            created_at,
            acknowledged: None,
            resolved: None,
            dismissed: None,
        }
    }

    /// Acknowledge the alert (Active → Acknowledged).
    pub fn acknowledge(&mut self, actor: impl Into<String>, at: Timestamp) -> Result<(), AlertError> {
        if self.status != AlertStatus::Active {
            return Err(self.invalid("acknowledged"));
        }
        self.status = AlertStatus::Acknowledged;
        self.acknowledged = Some(TransitionStamp {
            actor: actor.into(),
            at,
        });
        Ok(())
    }

    /// Resolve the alert (Active or Acknowledged → Resolved).
    pub fn resolve(&mut self, actor: impl Into<String>, at: Timestamp) -> Result<(), AlertError> {
        if self.status.is_terminal() {
            return Err(self.invalid("resolved"));
        }
        self.status = AlertStatus::Resolved;
        self.resolved = Some(TransitionStamp {
            actor: actor.into(),
            at,
        });
        Ok(())
    }

    /// Dismiss the alert (Active or Acknowledged → Dismissed).
    pub fn dismiss(&mut self, actor: impl Into<String>, at: Timestamp) -> Result<(), AlertError> {
        if self.status.is_terminal() {
            return Err(self.invalid("dismissed"));
        }
        self.status = AlertStatus::Dismissed;
        self.dismissed = Some(TransitionStamp {
            actor: actor.into(),
            at,
        });
        Ok(())
    }

    fn invalid(&self, to: &str) -> AlertError {
        AlertError::InvalidTransition {
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-01T12:00:00Z").unwrap()
    }

    fn raise_alert() -> Alert {
        Alert::raise(
            NewAlert {
                alert_type: "audit_overdue".to_string(),
                severity: Severity::High,
                title: "Audit overdue".to_string(),
                description: "Last audit completed 120 days ago".to_string(),
                merchant_id: MerchantId::new(),
                metadata: serde_json::Map::new(),
                expires_at: None,
            },
            now(),
        )
    }

    #[test]
    fn test_raise_starts_active() {
        let alert = raise_alert();
        assert_eq!(alert.status, AlertStatus::Active);
        assert!(alert.acknowledged.is_none());
    }

    #[test]
    fn test_acknowledge_stamps_actor_and_time() {
        let mut alert = raise_alert();
        alert.acknowledge("ops@merchant.example", now()).unwrap();
        assert_eq!(alert.status, AlertStatus::Acknowledged);
        let stamp = alert.acknowledged.as_ref().unwrap();
        assert_eq!(stamp.actor, "ops@merchant.example");
        assert_eq!(stamp.at, now());
    }

    #[test]
    fn test_active_to_resolved_directly() {
        let mut alert = raise_alert();
        alert.resolve("system", now()).unwrap();
        assert_eq!(alert.status, AlertStatus::Resolved);
        assert!(alert.status.is_terminal());
    }

    #[test]
    fn test_acknowledged_to_dismissed() {
        let mut alert = raise_alert();
        alert.acknowledge("ops", now()).unwrap();
        alert.dismiss("ops", now()).unwrap();
        assert_eq!(alert.status, AlertStatus::Dismissed);
    }

    #[test]
    fn test_cannot_acknowledge_twice() {
        let mut alert = raise_alert();
        alert.acknowledge("ops", now()).unwrap();
        assert!(alert.acknowledge("ops", now()).is_err());
    }

    #[test]
    fn test_no_transitions_from_resolved() {
        let mut alert = raise_alert();
        alert.resolve("ops", now()).unwrap();
        assert!(alert.acknowledge("ops", now()).is_err());
        assert!(alert.dismiss("ops", now()).is_err());
        assert!(alert.resolve("ops", now()).is_err());
    }

    #[test]
    fn test_no_transitions_from_dismissed() {
        let mut alert = raise_alert();
        alert.dismiss("ops", now()).unwrap();
        assert!(alert.resolve("ops", now()).is_err());
        assert_eq!(alert.status, AlertStatus::Dismissed);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut alert = raise_alert();
        alert.acknowledge("ops", now()).unwrap();
        let json = serde_json::to_string(&alert).unwrap();
        let parsed: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, AlertStatus::Acknowledged);
        assert_eq!(parsed.acknowledged.unwrap().actor, "ops");
    }
}
