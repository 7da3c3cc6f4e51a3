//! # In-Memory Store
//!
//! A `tokio::sync::RwLock`-backed implementation of [`ComplianceStore`] and
//! [`AlertSink`] for tests and local runs. Keeps full fidelity with the
//! trait contracts: `NotFound` for missing merchants, empty collections for
//! merchants with no records, append-only assessment history.
//!
//! Failure injection: [`MemoryStore::fail_data_point_reads`] makes the next
//! data-collection-point reads return an `Upstream` error with the given
//! message — the hook the audit-failure-path tests use.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use compass_core::{
    AlertId, AppRiskAssessment, CompassError, ComplianceStatus, DataCollectionPoint, MerchantId,
    MerchantProfile, PrivacyPolicy, RegulatoryRule, Score, ThirdPartyApp, Timestamp,
};
use compass_state::{Alert, AlertStatus, AuditStatus, ComplianceAudit, NewAlert};

use crate::store::{AlertCounts, AlertSink, ComplianceStore};

/// A data-subject request as the monitor sees it: when it arrived and
/// whether it is still pending.
#[derive(Debug, Clone)]
pub struct DataSubjectRequest {
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// When the request was submitted.
    pub submitted_at: Timestamp,
    /// Whether the request is still unfulfilled.
    pub pending: bool,
}

/// A consent-withdrawal event.
#[derive(Debug, Clone)]
pub struct ConsentWithdrawal {
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// When the withdrawal happened.
    pub withdrawn_at: Timestamp,
}

/// A recorded breach incident.
#[derive(Debug, Clone)]
pub struct BreachIncident {
    /// Owning merchant.
    pub merchant_id: MerchantId,
    /// When the breach occurred.
    pub occurred_at: Timestamp,
}

#[derive(Debug, Default)]
struct Inner {
    merchants: HashMap<MerchantId, MerchantProfile>,
    policies: Vec<PrivacyPolicy>,
    data_points: Vec<DataCollectionPoint>,
    rules: Vec<RegulatoryRule>,
    apps: HashMap<compass_core::AppId, ThirdPartyApp>,
    audits: HashMap<compass_core::AuditId, ComplianceAudit>,
    assessments: Vec<AppRiskAssessment>,
    requests: Vec<DataSubjectRequest>,
    withdrawals: Vec<ConsentWithdrawal>,
    breaches: Vec<BreachIncident>,
    alerts: Vec<Alert>,
    fail_data_points: Option<String>,
}

/// In-memory [`ComplianceStore`] + [`AlertSink`].
///
/// Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a merchant profile.
    pub async fn add_merchant(&self, merchant: MerchantProfile) {
        self.inner
            .write()
            .await
            .merchants
            .insert(merchant.id, merchant);
    }

    /// Seed a policy document.
    pub async fn add_policy(&self, policy: PrivacyPolicy) {
        self.inner.write().await.policies.push(policy);
    }

    /// Seed a data-collection point.
    pub async fn add_data_point(&self, point: DataCollectionPoint) {
        self.inner.write().await.data_points.push(point);
    }

    /// Seed a regulatory rule.
    pub async fn add_rule(&self, rule: RegulatoryRule) {
        self.inner.write().await.rules.push(rule);
    }

    /// Seed an app record.
    pub async fn add_app(&self, app: ThirdPartyApp) {
        self.inner.write().await.apps.insert(app.id, app);
    }

    /// Seed a data-subject request.
    pub async fn add_request(&self, request: DataSubjectRequest) {
        self.inner.write().await.requests.push(request);
    }

    /// Seed a consent withdrawal.
    pub async fn add_withdrawal(&self, withdrawal: ConsentWithdrawal) {
        self.inner.write().await.withdrawals.push(withdrawal);
    }

    /// Seed a breach incident.
    pub async fn add_breach(&self, breach: BreachIncident) {
        self.inner.write().await.breaches.push(breach);
    }

    /// Make subsequent data-collection-point reads fail with an `Upstream`
    /// error carrying `message`. Pass `None` to clear.
    pub async fn fail_data_point_reads(&self, message: Option<String>) {
        self.inner.write().await.fail_data_points = message;
    }

    /// All stored audits for a merchant, in insertion-independent order.
    pub async fn audits_for(&self, merchant: MerchantId) -> Vec<ComplianceAudit> {
        self.inner
            .read()
            .await
            .audits
            .values()
            .filter(|a| a.merchant_id == merchant)
            .cloned()
            .collect()
    }

    /// All assessment history records for a merchant, oldest first.
    pub async fn assessments_for(&self, merchant: MerchantId) -> Vec<AppRiskAssessment> {
        self.inner
            .read()
            .await
            .assessments
            .iter()
            .filter(|a| a.merchant_id == merchant)
            .cloned()
            .collect()
    }

    /// All alerts raised for a merchant, oldest first.
    pub async fn alerts_for(&self, merchant: MerchantId) -> Vec<Alert> {
        self.inner
            .read()
            .await
            .alerts
            .iter()
            .filter(|a| a.merchant_id == merchant)
            .cloned()
            .collect()
    }
}

impl ComplianceStore for MemoryStore {
    async fn get_merchant(&self, id: MerchantId) -> Result<MerchantProfile, CompassError> {
        self.inner
            .read()
            .await
            .merchants
            .get(&id)
            .cloned()
            .ok_or_else(|| CompassError::not_found("merchant", id.to_string()))
    }

    async fn list_policies(
        &self,
        merchant: MerchantId,
    ) -> Result<Vec<PrivacyPolicy>, CompassError> {
        let mut policies: Vec<_> = self
            .inner
            .read()
            .await
            .policies
            .iter()
            .filter(|p| p.merchant_id == merchant)
            .cloned()
            .collect();
        // Newest first, matching the production query's sort order.
        policies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(policies)
    }

    async fn list_data_collection_points(
        &self,
        merchant: MerchantId,
    ) -> Result<Vec<DataCollectionPoint>, CompassError> {
        let inner = self.inner.read().await;
        if let Some(message) = &inner.fail_data_points {
            return Err(CompassError::Upstream(message.clone()));
        }
        Ok(inner
            .data_points
            .iter()
            .filter(|p| p.merchant_id == merchant)
            .cloned()
            .collect())
    }

    async fn list_active_rules(&self) -> Result<Vec<RegulatoryRule>, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .rules
            .iter()
            .filter(|r| r.active)
            .cloned()
            .collect())
    }

    async fn list_apps(&self, merchant: MerchantId) -> Result<Vec<ThirdPartyApp>, CompassError> {
        let mut apps: Vec<_> = self
            .inner
            .read()
            .await
            .apps
            .values()
            .filter(|a| a.merchant_id == merchant)
            .cloned()
            .collect();
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(apps)
    }

    async fn upsert_app(&self, app: ThirdPartyApp) -> Result<(), CompassError> {
        self.inner.write().await.apps.insert(app.id, app);
        Ok(())
    }

    async fn save_audit(&self, audit: &ComplianceAudit) -> Result<(), CompassError> {
        self.inner
            .write()
            .await
            .audits
            .insert(audit.id, audit.clone());
        Ok(())
    }

    async fn update_merchant_compliance(
        &self,
        merchant: MerchantId,
        score: Score,
        status: ComplianceStatus,
    ) -> Result<(), CompassError> {
        let mut inner = self.inner.write().await;
        let profile = inner
            .merchants
            .get_mut(&merchant)
            .ok_or_else(|| CompassError::not_found("merchant", merchant.to_string()))?;
        profile.compliance_score = score;
        profile.compliance_status = status;
        Ok(())
    }

    async fn save_app_risk_assessment(
        &self,
        assessment: AppRiskAssessment,
    ) -> Result<(), CompassError> {
        // Append-only: history is retained.
        self.inner.write().await.assessments.push(assessment);
        Ok(())
    }

    async fn last_completed_audit(
        &self,
        merchant: MerchantId,
    ) -> Result<Option<ComplianceAudit>, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .audits
            .values()
            .filter(|a| a.merchant_id == merchant && a.status == AuditStatus::Completed)
            .max_by_key(|a| a.completed_at)
            .cloned())
    }

    async fn count_pending_requests(&self, merchant: MerchantId) -> Result<u64, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .requests
            .iter()
            .filter(|r| r.merchant_id == merchant && r.pending)
            .count() as u64)
    }

    async fn count_overdue_requests(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        older_than_days: i64,
    ) -> Result<u64, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .requests
            .iter()
            .filter(|r| {
                r.merchant_id == merchant
                    && r.pending
                    && as_of.days_since(r.submitted_at) > older_than_days
            })
            .count() as u64)
    }

    async fn count_withdrawn_consents(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        window_days: i64,
    ) -> Result<u64, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .withdrawals
            .iter()
            .filter(|w| {
                let age = as_of.days_since(w.withdrawn_at);
                w.merchant_id == merchant && (0..=window_days).contains(&age)
            })
            .count() as u64)
    }

    async fn count_recent_breaches(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        window_days: i64,
    ) -> Result<u64, CompassError> {
        Ok(self
            .inner
            .read()
            .await
            .breaches
            .iter()
            .filter(|b| {
                let age = as_of.days_since(b.occurred_at);
                b.merchant_id == merchant && (0..=window_days).contains(&age)
            })
            .count() as u64)
    }

    async fn count_active_alerts(&self, merchant: MerchantId) -> Result<AlertCounts, CompassError> {
        let inner = self.inner.read().await;
        let mut counts = AlertCounts::default();
        for alert in inner
            .alerts
            .iter()
            .filter(|a| a.merchant_id == merchant && a.status == AlertStatus::Active)
        {
            match alert.severity {
                compass_core::Severity::Critical => counts.critical += 1,
                compass_core::Severity::High => counts.high += 1,
                compass_core::Severity::Medium => counts.medium += 1,
                compass_core::Severity::Low => counts.low += 1,
            }
        }
        Ok(counts)
    }
}

impl AlertSink for MemoryStore {
    async fn create_alert(&self, alert: NewAlert) -> Result<AlertId, CompassError> {
        let alert = Alert::raise(alert, Timestamp::now());
        let id = alert.id;
        tracing::debug!(alert_id = %id, alert_type = %alert.alert_type, "alert enqueued");
        self.inner.write().await.alerts.push(alert);
        Ok(id)
    }
}
