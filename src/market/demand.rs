//! Demand prediction
//!
//! The demand level is a categorical draw; the numeric demand score is the
//! crop's catalog base score. Both live in one `DemandForecast` so the level
//! and the score used for ranking always come from the same prediction.

use serde::{Deserialize, Serialize};

use super::signals::MarketSignalSource;
use crate::catalog::CropCatalogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

/// Demand prediction for one crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub demand_level: DemandLevel,
    pub demand_score: f64,
    /// Base demand scaled by a growth factor in [0.8, 1.2)
    pub growth_potential: f64,
}

/// Predict demand for a crop
pub fn predict_demand<S>(entry: &CropCatalogEntry, signals: &mut S) -> DemandForecast
where
    S: MarketSignalSource + ?Sized,
{
    let demand_level = signals.demand_level();
    let demand_score = entry.base_demand_score;

    DemandForecast {
        demand_level,
        demand_score,
        growth_potential: demand_score * signals.growth_factor(),
    }
}
