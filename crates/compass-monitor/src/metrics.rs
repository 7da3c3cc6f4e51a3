//! # Monitoring Metrics
//!
//! The dashboard-facing metrics score: an independently-weighted formula
//! over backlog sizes and active-alert counts. This is a different formula
//! from the per-merchant health check and must not be conflated with it.

use serde::{Deserialize, Serialize};

use compass_core::{CompassError, MerchantId, Score, Timestamp};
use compass_store::{AlertCounts, ComplianceStore};

/// Penalty per pending data-subject request.
const PENDING_REQUEST_PENALTY: i64 = 2;
/// Penalty per consent withdrawal in the trailing window.
const WITHDRAWAL_PENALTY: i64 = 1;
/// Penalty per breach incident in the trailing window.
const BREACH_PENALTY: i64 = 10;
/// Penalties per active alert by severity, critical through low.
const ALERT_PENALTIES: [i64; 4] = [15, 10, 5, 1];
/// Trailing window for withdrawals and breaches, in days.
const TRAILING_WINDOW_DAYS: i64 = 30;

/// Backlog and alert counts with the derived metrics score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringMetrics {
    /// The merchant measured.
    pub merchant_id: MerchantId,
    /// Pending data-subject requests.
    pub pending_requests: u64,
    /// Consent withdrawals in the trailing window.
    pub withdrawn_consents: u64,
    /// Breach incidents in the trailing window.
    pub recent_breaches: u64,
    /// Active alerts by severity.
    pub active_alerts: AlertCounts,
    /// Weighted metrics score, clamped to [0,100].
    pub score: Score,
    /// When the metrics were computed.
    pub computed_at: Timestamp,
}

/// Compute the monitoring metrics for `merchant_id` as of `now`.
pub async fn monitoring_metrics<S: ComplianceStore>(
    store: &S,
    merchant_id: MerchantId,
    now: Timestamp,
) -> Result<MonitoringMetrics, CompassError> {
    store.get_merchant(merchant_id).await?;

    let pending_requests = store.count_pending_requests(merchant_id).await?;
    let withdrawn_consents = store
        .count_withdrawn_consents(merchant_id, now, TRAILING_WINDOW_DAYS)
        .await?;
    let recent_breaches = store
        .count_recent_breaches(merchant_id, now, TRAILING_WINDOW_DAYS)
        .await?;
    let active_alerts = store.count_active_alerts(merchant_id).await?;

    let score = metrics_score(
        pending_requests,
        withdrawn_consents,
        recent_breaches,
        &active_alerts,
    );
    Ok(MonitoringMetrics {
        merchant_id,
        pending_requests,
        withdrawn_consents,
        recent_breaches,
        active_alerts,
        score,
        computed_at: now,
    })
}

/// The pure metrics formula, separated for direct testing.
pub fn metrics_score(
    pending_requests: u64,
    withdrawn_consents: u64,
    recent_breaches: u64,
    alerts: &AlertCounts,
) -> Score {
    let [critical_p, high_p, medium_p, low_p] = ALERT_PENALTIES;
    let penalty = PENDING_REQUEST_PENALTY * pending_requests as i64
        + WITHDRAWAL_PENALTY * withdrawn_consents as i64
        + BREACH_PENALTY * recent_breaches as i64
        + critical_p * alerts.critical as i64
        + high_p * alerts.high as i64
        + medium_p * alerts.medium as i64
        + low_p * alerts.low as i64;
    Score::clamped(100 - penalty)
}
