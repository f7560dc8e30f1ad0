//! Profitability estimate
//!
//! Yield scales with farm size; cost and revenue scale with the current
//! price from the same price draw as the trend analysis. Margin and ROI are
//! fixed until a cost model exists.
//!
//! Yield, cost and revenue are unclamped farm-wide totals and saturate to
//! infinity for farms too large for `f64`. Margin and ROI stay finite.

use serde::{Deserialize, Serialize};

use super::price_trend::PriceAnalysis;
use crate::catalog::CropCatalogEntry;
use crate::error::{check_farm_size, ScoringResult};

/// Share of revenue consumed by production cost
pub const PRODUCTION_COST_SHARE: f64 = 0.4;
pub const PROFIT_MARGIN: f64 = 0.6;
pub const RETURN_ON_INVESTMENT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityEstimate {
    /// Tons for the whole farm
    pub estimated_yield: f64,
    pub production_cost: f64,
    pub potential_revenue: f64,
    pub profit_margin: f64,
    pub roi: f64,
}

/// Estimate profitability for a crop on `farm_size` hectares
pub fn calculate_profitability(
    entry: &CropCatalogEntry,
    price: &PriceAnalysis,
    farm_size: f64,
) -> ScoringResult<ProfitabilityEstimate> {
    check_farm_size(farm_size)?;

    let estimated_yield = entry.base_yield * farm_size;
    let potential_revenue = estimated_yield * price.current_price;

    Ok(ProfitabilityEstimate {
        estimated_yield,
        production_cost: potential_revenue * PRODUCTION_COST_SHARE,
        potential_revenue,
        profit_margin: PROFIT_MARGIN,
        roi: RETURN_ON_INVESTMENT,
    })
}
