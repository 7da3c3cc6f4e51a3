//! # Per-Merchant Health Check
//!
//! A holistic compliance score computed independently of the formal audit
//! pipeline: starts at 100 and subtracts penalties for audit staleness, DSR
//! backlog, consent-withdrawal volume, and recent breaches. Penalties apply
//! additively; the score is clamped to zero only at the end.
//!
//! Critical issues are forwarded to the alerting sink fire-and-forget: a
//! sink failure is logged, never propagated.

use serde::{Deserialize, Serialize};

use compass_core::{CompassError, Finding, MerchantId, Score, Severity, Timestamp};
use compass_state::NewAlert;
use compass_store::{AlertSink, ComplianceStore};

// ---------------------------------------------------------------------------
// Penalties and windows
// ---------------------------------------------------------------------------

/// Penalty when the last audit is more than 90 days old (or never ran).
const STALE_AUDIT_PENALTY: i64 = 20;
/// Penalty when the last audit is 60 to 90 days old.
const AGING_AUDIT_PENALTY: i64 = 10;
/// Penalty when any pending DSR is overdue.
const OVERDUE_DSR_PENALTY: i64 = 30;
/// Penalty when the pending DSR backlog exceeds [`DSR_BACKLOG_LIMIT`].
const DSR_BACKLOG_PENALTY: i64 = 15;
/// Penalty when trailing-month consent withdrawals exceed
/// [`WITHDRAWAL_LIMIT`].
const WITHDRAWAL_PENALTY: i64 = 15;
/// Penalty per health check when any breach occurred in the trailing month.
const BREACH_PENALTY: i64 = 40;

/// Audit age beyond which the stale penalty applies.
const STALE_AUDIT_DAYS: i64 = 90;
/// Audit age at which the aging penalty starts.
const AGING_AUDIT_DAYS: i64 = 60;
/// DSRs older than this many days are overdue.
const DSR_OVERDUE_DAYS: i64 = 30;
/// Pending DSR count above which the backlog penalty applies.
const DSR_BACKLOG_LIMIT: u64 = 5;
/// Consent withdrawals in the trailing window above which the volume
/// penalty applies.
const WITHDRAWAL_LIMIT: u64 = 10;
/// Trailing window for withdrawals and breaches, in days.
const TRAILING_WINDOW_DAYS: i64 = 30;
/// Audit cadence: the next audit is due this many days after the last.
const AUDIT_CADENCE_DAYS: i64 = 90;

// ---------------------------------------------------------------------------
// HealthCheck
// ---------------------------------------------------------------------------

/// Result of one per-merchant health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// The merchant checked.
    pub merchant_id: MerchantId,
    /// Holistic score after all penalties, clamped to [0,100].
    pub overall_score: Score,
    /// Detected issues, in check order.
    pub issues: Vec<Finding>,
    /// When the last completed audit finished, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_audit: Option<Timestamp>,
    /// When the next audit is due. A never-audited merchant is due one
    /// cadence from now, not overdue immediately.
    pub next_audit_due: Timestamp,
    /// When the check ran.
    pub checked_at: Timestamp,
}

/// Run the health check for `merchant_id` as of `now`.
///
/// Critical issues are forwarded to `alerts`; delivery failures are logged
/// and swallowed.
pub async fn health_check<S, A>(
    store: &S,
    alerts: &A,
    merchant_id: MerchantId,
    now: Timestamp,
) -> Result<HealthCheck, CompassError>
where
    S: ComplianceStore,
    A: AlertSink,
{
    store.get_merchant(merchant_id).await?;

    let mut penalty: i64 = 0;
    let mut issues: Vec<Finding> = Vec::new();

    // Audit staleness. No prior audit counts as infinite staleness.
    let last_audit = store
        .last_completed_audit(merchant_id)
        .await?
        .and_then(|a| a.completed_at);
    match last_audit {
        Some(completed) => {
            let days = now.days_since(completed);
            if days > STALE_AUDIT_DAYS {
                issues.push(Finding::new(
                    "Audit Staleness",
                    Severity::High,
                    format!("Last compliance audit completed {days} days ago"),
                    "Compliance posture may have drifted since the last audit",
                ));
                penalty += STALE_AUDIT_PENALTY;
            } else if days >= AGING_AUDIT_DAYS {
                issues.push(Finding::new(
                    "Audit Staleness",
                    Severity::Medium,
                    format!("Last compliance audit completed {days} days ago"),
                    "An audit refresh is due soon",
                ));
                penalty += AGING_AUDIT_PENALTY;
            }
        }
        None => {
            issues.push(Finding::new(
                "Audit Staleness",
                Severity::High,
                "No compliance audit has ever completed".to_string(),
                "Compliance posture is unverified",
            ));
            penalty += STALE_AUDIT_PENALTY;
        }
    }

    // DSR backlog. Overdue requests dominate; a large but fresh backlog
    // draws the lesser penalty.
    let pending = store.count_pending_requests(merchant_id).await?;
    if pending > 0 {
        let overdue = store
            .count_overdue_requests(merchant_id, now, DSR_OVERDUE_DAYS)
            .await?;
        if overdue > 0 {
            issues.push(Finding::new(
                "Data Subject Requests",
                Severity::Critical,
                format!("{overdue} data subject request(s) overdue past {DSR_OVERDUE_DAYS} days"),
                "Statutory response deadlines have been missed",
            ));
            penalty += OVERDUE_DSR_PENALTY;
        } else if pending > DSR_BACKLOG_LIMIT {
            issues.push(Finding::new(
                "Data Subject Requests",
                Severity::High,
                format!("{pending} data subject requests pending"),
                "The backlog risks missing statutory deadlines",
            ));
            penalty += DSR_BACKLOG_PENALTY;
        }
    }

    // Consent-withdrawal volume.
    let withdrawals = store
        .count_withdrawn_consents(merchant_id, now, TRAILING_WINDOW_DAYS)
        .await?;
    if withdrawals > WITHDRAWAL_LIMIT {
        issues.push(Finding::new(
            "Consent",
            Severity::Medium,
            format!("{withdrawals} consent withdrawals in the last {TRAILING_WINDOW_DAYS} days"),
            "Elevated withdrawal volume suggests trust or consent-UX problems",
        ));
        penalty += WITHDRAWAL_PENALTY;
    }

    // Recent breaches.
    let breaches = store
        .count_recent_breaches(merchant_id, now, TRAILING_WINDOW_DAYS)
        .await?;
    if breaches > 0 {
        issues.push(Finding::new(
            "Breach Incidents",
            Severity::Critical,
            format!("{breaches} breach incident(s) in the last {TRAILING_WINDOW_DAYS} days"),
            "Notification duties and remediation must be verified",
        ));
        penalty += BREACH_PENALTY;
    }

    forward_critical_issues(alerts, merchant_id, &issues).await;

    let check = HealthCheck {
        merchant_id,
        overall_score: Score::clamped(100 - penalty),
        issues,
        last_audit,
        next_audit_due: last_audit.unwrap_or(now).plus_days(AUDIT_CADENCE_DAYS),
        checked_at: now,
    };
    tracing::debug!(
        merchant_id = %merchant_id,
        score = check.overall_score.value(),
        issues = check.issues.len(),
        "health check completed"
    );
    Ok(check)
}

/// Raise one alert per critical issue. Fire-and-forget.
async fn forward_critical_issues<A: AlertSink>(
    alerts: &A,
    merchant_id: MerchantId,
    issues: &[Finding],
) {
    for issue in issues.iter().filter(|i| i.severity == Severity::Critical) {
        let alert = NewAlert {
            alert_type: match issue.category.as_str() {
                "Data Subject Requests" => "overdue_dsr".to_string(),
                "Breach Incidents" => "data_breach".to_string(),
                _ => "compliance_health".to_string(),
            },
            severity: issue.severity,
            title: issue.category.clone(),
            description: issue.description.clone(),
            merchant_id,
            metadata: serde_json::Map::new(),
            expires_at: None,
        };
        if let Err(err) = alerts.create_alert(alert).await {
            tracing::warn!(merchant_id = %merchant_id, error = %err, "alert enqueue failed");
        }
    }
}
