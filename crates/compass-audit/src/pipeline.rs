//! # Audit Pipeline
//!
//! Orchestrates a full audit run for one merchant: opens a `Processing`
//! audit record, fetches state, folds the check outcomes into a score, and
//! persists the terminal record.
//!
//! ## Failure path
//!
//! Any upstream failure while fetching state is caught exactly once here,
//! recorded into the audit as `Failed` with the original message, and then
//! re-returned to the caller. The caller always observes the original
//! error; the failed record exists for the audit trail.

use compass_core::{CompassError, MerchantId, Timestamp};
use compass_state::ComplianceAudit;
use compass_store::ComplianceStore;

use crate::checks::{self, AuditResult};

/// Run a compliance audit for `merchant_id` and persist the result.
///
/// Returns the terminal audit record on success. The merchant profile's
/// running score and status are updated as a side effect.
pub async fn run_audit<S: ComplianceStore>(
    store: &S,
    merchant_id: MerchantId,
) -> Result<ComplianceAudit, CompassError> {
    let mut audit = ComplianceAudit::open(merchant_id, Timestamp::now());
    store.save_audit(&audit).await?;
    tracing::info!(audit_id = %audit.id, merchant_id = %merchant_id, "audit started");

    match execute_checks(store, merchant_id).await {
        Ok(result) => {
            audit
                .complete(
                    result.score.inverse(),
                    result.findings,
                    result.recommendations,
                    Timestamp::now(),
                )
                .map_err(|e| CompassError::InvalidState(e.to_string()))?;
            store.save_audit(&audit).await?;
            store
                .update_merchant_compliance(merchant_id, result.score, result.status)
                .await?;
            tracing::info!(
                audit_id = %audit.id,
                score = result.score.value(),
                status = %result.status,
                "audit completed"
            );
            Ok(audit)
        }
        Err(err) => {
            tracing::warn!(audit_id = %audit.id, error = %err, "audit failed");
            if audit.fail(err.to_string(), Timestamp::now()).is_ok() {
                // The failed record must not mask the original error.
                let _ = store.save_audit(&audit).await;
            }
            Err(err)
        }
    }
}

/// Fetch merchant state and fold the four checks.
async fn execute_checks<S: ComplianceStore>(
    store: &S,
    merchant_id: MerchantId,
) -> Result<AuditResult, CompassError> {
    // A missing merchant is a typed not-found, never an empty audit.
    store.get_merchant(merchant_id).await?;
    let policies = store.list_policies(merchant_id).await?;
    let points = store.list_data_collection_points(merchant_id).await?;

    Ok(checks::aggregate([
        checks::check_policy(&policies),
        checks::check_data_mapping(&points),
        checks::check_legal_basis(&points),
        checks::check_retention(&points),
    ]))
}
