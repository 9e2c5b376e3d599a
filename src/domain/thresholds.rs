//! Reference limits the decision engine compares lab values against.

use super::DomainError;

/// Upper limit of normal for creatine kinase (U/L).
pub const ULN_CK: f64 = 200.0;
/// Upper limit of normal for ALT/AST (U/L).
pub const ULN_TRANSAMINASE: f64 = 40.0;
/// Total bilirubin cut-off (mg/dL).
pub const BILIRUBIN_THRESHOLD: f64 = 2.0;

/// Immutable threshold set captured by an engine at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub uln_ck: f64,
    pub uln_transaminase: f64,
    pub bilirubin_threshold: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            uln_ck: ULN_CK,
            uln_transaminase: ULN_TRANSAMINASE,
            bilirubin_threshold: BILIRUBIN_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Build a custom threshold set. Every limit must be finite and strictly positive.
    pub fn new(
        uln_ck: f64,
        uln_transaminase: f64,
        bilirubin_threshold: f64,
    ) -> Result<Self, DomainError> {
        for (name, value) in [
            ("uln_ck", uln_ck),
            ("uln_transaminase", uln_transaminase),
            ("bilirubin_threshold", bilirubin_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            uln_ck,
            uln_transaminase,
            bilirubin_threshold,
        })
    }

    /// CK level at `multiple` × ULN.
    pub fn ck_limit(&self, multiple: f64) -> f64 {
        multiple * self.uln_ck
    }

    /// Transaminase level at `multiple` × ULN.
    pub fn transaminase_limit(&self, multiple: f64) -> f64 {
        multiple * self.uln_transaminase
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
