//! # Risk Weight Configuration
//!
//! The sub-factor weight table for the app risk composite, hoisted into a
//! named configuration passed explicitly into the scoring functions so the
//! weights can be tested and tuned independently.

use serde::{Deserialize, Serialize};

use compass_core::{CompassError, RiskFactor};

/// Tolerance when validating that weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-factor weights of the app risk composite. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Weight of the data-access factor.
    pub data_access: f64,
    /// Weight of the permission-scope factor.
    pub permissions: f64,
    /// Weight of the compliance-posture factor.
    pub compliance: f64,
    /// Weight of the security-posture factor.
    pub security: f64,
    /// Weight of the developer-reputation factor.
    pub reputation: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            data_access: 0.30,
            permissions: 0.25,
            compliance: 0.20,
            security: 0.15,
            reputation: 0.10,
        }
    }
}

impl RiskWeights {
    /// The weight assigned to one factor.
    pub fn get(&self, factor: RiskFactor) -> f64 {
        match factor {
            RiskFactor::DataAccess => self.data_access,
            RiskFactor::Permissions => self.permissions,
            RiskFactor::Compliance => self.compliance,
            RiskFactor::Security => self.security,
            RiskFactor::Reputation => self.reputation,
        }
    }

    /// Validate that every weight is in [0,1] and they sum to 1.0.
    pub fn validate(&self) -> Result<(), CompassError> {
        let weights = RiskFactor::all().iter().map(|f| self.get(*f));
        for (factor, w) in RiskFactor::all().iter().zip(weights.clone()) {
            if !(0.0..=1.0).contains(&w) || w.is_nan() {
                return Err(CompassError::Validation(format!(
                    "risk weight out of range for {factor:?}: {w}"
                )));
            }
        }
        let sum: f64 = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CompassError::Validation(format!(
                "risk weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Configuration for an assessment run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskModelConfig {
    /// Sub-factor weights.
    #[serde(default)]
    pub weights: RiskWeights,
    /// When set, the fleet breakdown decomposes the overall score from the
    /// per-factor weighted contributions instead of re-applying each weight
    /// to the already-weighted mean. The default preserves the historical
    /// approximation.
    #[serde(default)]
    pub corrected_breakdown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        RiskWeights::default().validate().unwrap();
    }

    #[test]
    fn test_default_weight_table() {
        let w = RiskWeights::default();
        assert_eq!(w.get(RiskFactor::DataAccess), 0.30);
        assert_eq!(w.get(RiskFactor::Permissions), 0.25);
        assert_eq!(w.get(RiskFactor::Compliance), 0.20);
        assert_eq!(w.get(RiskFactor::Security), 0.15);
        assert_eq!(w.get(RiskFactor::Reputation), 0.10);
    }

    #[test]
    fn test_bad_sum_rejected() {
        let w = RiskWeights {
            data_access: 0.5,
            ..RiskWeights::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let w = RiskWeights {
            data_access: -0.1,
            permissions: 0.65,
            ..RiskWeights::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_config_default_uses_historical_breakdown() {
        assert!(!RiskModelConfig::default().corrected_breakdown);
    }
}
