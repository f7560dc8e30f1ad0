//! Scoring errors
//!
//! The engine never fails on unknown crops or soils (those resolve to catalog
//! defaults). It fails only on invalid inputs and on results that cannot be
//! joined back together.

use thiserror::Error;

/// Errors raised by the recommendation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Caller supplied a value outside the engine's domain (e.g. farm size <= 0)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Per-crop stage results do not line up (length mismatch, missing or duplicated crop)
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;

/// Reject farm sizes the formulas cannot handle
pub(crate) fn check_farm_size(farm_size: f64) -> ScoringResult<()> {
    if farm_size.is_finite() && farm_size > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::InvalidInput(format!(
            "farm size must be a positive finite number of hectares, got {}",
            farm_size
        )))
    }
}
