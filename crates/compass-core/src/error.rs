//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the Compass workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - **Not-found is typed, never defaulted.** A missing merchant, rule, or
//!   request surfaces as `CompassError::NotFound` — the scoring engines do
//!   not substitute empty state for a missing entity.
//! - **Degraded input is not an error.** Missing optional domain data
//!   (no retention period, no legal basis, unknown encryption status) is
//!   expressed as findings by the engines, never as an `Err`.
//! - **Upstream failures carry the original message** so the audit pipeline
//!   can record them into a failed audit and still re-return them.

use thiserror::Error;

/// Top-level error type for the Compass workspace.
#[derive(Error, Debug)]
pub enum CompassError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g., "merchant", "rule", "app").
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// An operation was attempted against an entity in the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The persistence or alerting collaborator failed.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Input validation failure (malformed timestamp, bad configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CompassError {
    /// Construct a not-found error for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CompassError::not_found("merchant", "m-123");
        assert_eq!(err.to_string(), "merchant not found: m-123");
    }

    #[test]
    fn test_upstream_display() {
        let err = CompassError::Upstream("connection reset".to_string());
        assert_eq!(err.to_string(), "upstream failure: connection reset");
    }
}
