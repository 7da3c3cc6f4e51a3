//! # Score — Clamped [0,100] Compliance Score
//!
//! Every score the engines produce flows through this newtype, so a value
//! outside [0,100] cannot escape the workspace. Construction clamps; there
//! is no fallible variant because out-of-range inputs are a normal outcome
//! of deduction arithmetic, not an error.

use serde::{Deserialize, Serialize};

/// An integer compliance or risk score clamped to [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// The maximum score (fully compliant / maximal risk).
    pub const MAX: Score = Score(100);

    /// The minimum score.
    pub const MIN: Score = Score(0);

    /// Clamp an arbitrary signed value into [0,100].
    ///
    /// Deduction arithmetic (`100 - Σ deductions`) can go negative; weighted
    /// sums can exceed 100. Both are normal and clamp silently.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    /// Round a ratio-derived float into a clamped score.
    ///
    /// Used by the gap analyzer (`total/max*100`) and the app risk
    /// composite (`Σ subscore × weight`). NaN clamps to 0 rather than
    /// propagating.
    pub fn from_rounded(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// The score value as an integer.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The inverse score (`100 - self`). A compliance score's inverse is
    /// the audit risk score and vice versa.
    pub fn inverse(&self) -> Self {
        Self(100 - self.0)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
