//! # Store Traits
//!
//! The abstract interfaces the scoring engines call. Methods are async
//! (native `async fn` in traits; the workspace pins Rust 1.75) and return
//! `CompassError` — `NotFound` for missing entities, `Upstream` for
//! collaborator failures.

use serde::{Deserialize, Serialize};

use compass_core::{
    AlertId, AppRiskAssessment, CompassError, DataCollectionPoint, MerchantId, MerchantProfile,
    PrivacyPolicy, RegulatoryRule, Score, ThirdPartyApp, Timestamp,
};
use compass_state::{ComplianceAudit, NewAlert};

/// Active-alert counts per severity for one merchant.
///
/// Consumed by the fleet monitoring-metrics formula, which weighs each
/// severity differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCounts {
    /// Active critical alerts.
    pub critical: u64,
    /// Active high alerts.
    pub high: u64,
    /// Active medium alerts.
    pub medium: u64,
    /// Active low alerts.
    pub low: u64,
}

/// The persistence collaborator the engines read merchant state from and
/// write results to.
///
/// Reads return `NotFound` for a missing merchant and empty collections for
/// a merchant with no records — a merchant without apps is a valid input,
/// a missing merchant is not.
#[allow(async_fn_in_trait)]
pub trait ComplianceStore {
    /// Fetch a merchant profile.
    async fn get_merchant(&self, id: MerchantId) -> Result<MerchantProfile, CompassError>;

    /// List a merchant's policy documents, newest first.
    async fn list_policies(&self, merchant: MerchantId)
        -> Result<Vec<PrivacyPolicy>, CompassError>;

    /// List a merchant's data-collection points.
    async fn list_data_collection_points(
        &self,
        merchant: MerchantId,
    ) -> Result<Vec<DataCollectionPoint>, CompassError>;

    /// List the active regulatory rules in the catalog.
    async fn list_active_rules(&self) -> Result<Vec<RegulatoryRule>, CompassError>;

    /// List a merchant's installed third-party apps.
    async fn list_apps(&self, merchant: MerchantId) -> Result<Vec<ThirdPartyApp>, CompassError>;

    /// Insert or replace an app record (keyed by app id).
    async fn upsert_app(&self, app: ThirdPartyApp) -> Result<(), CompassError>;

    /// Insert or replace an audit record (keyed by audit id).
    async fn save_audit(&self, audit: &ComplianceAudit) -> Result<(), CompassError>;

    /// Write a merchant's compliance score and status back to the profile.
    async fn update_merchant_compliance(
        &self,
        merchant: MerchantId,
        score: Score,
        status: compass_core::ComplianceStatus,
    ) -> Result<(), CompassError>;

    /// Append an app risk assessment to the merchant's history.
    async fn save_app_risk_assessment(
        &self,
        assessment: AppRiskAssessment,
    ) -> Result<(), CompassError>;

    /// The most recent completed audit for a merchant, if any.
    async fn last_completed_audit(
        &self,
        merchant: MerchantId,
    ) -> Result<Option<ComplianceAudit>, CompassError>;

    /// Count pending data-subject requests.
    async fn count_pending_requests(&self, merchant: MerchantId) -> Result<u64, CompassError>;

    /// Count pending data-subject requests older than `older_than_days`
    /// as of `as_of`.
    async fn count_overdue_requests(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        older_than_days: i64,
    ) -> Result<u64, CompassError>;

    /// Count consent withdrawals in the trailing `window_days` before `as_of`.
    async fn count_withdrawn_consents(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        window_days: i64,
    ) -> Result<u64, CompassError>;

    /// Count breach incidents in the trailing `window_days` before `as_of`.
    async fn count_recent_breaches(
        &self,
        merchant: MerchantId,
        as_of: Timestamp,
        window_days: i64,
    ) -> Result<u64, CompassError>;

    /// Count the merchant's active alerts per severity.
    async fn count_active_alerts(&self, merchant: MerchantId) -> Result<AlertCounts, CompassError>;
}

/// Fire-and-forget alert creation.
///
/// The detection components await only the enqueue result; they do not
/// retry, deduplicate, or await delivery.
#[allow(async_fn_in_trait)]
pub trait AlertSink {
    /// Enqueue a new alert; returns the assigned id.
    async fn create_alert(&self, alert: NewAlert) -> Result<AlertId, CompassError>;
}
