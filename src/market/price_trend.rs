//! Price trend analysis
//!
//! One current-price draw and one trend draw per crop. The trend is drawn
//! independently of the price.

use serde::{Deserialize, Serialize};

use super::signals::MarketSignalSource;
use crate::catalog::CropCatalogEntry;

/// Direction of the price forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTrend {
    Decreasing,
    Stable,
    Increasing,
}

impl PriceTrend {
    /// Multiplier applied to the current price for the predicted price
    pub fn price_multiplier(self) -> f64 {
        match self {
            PriceTrend::Increasing => 1.1,
            PriceTrend::Stable => 1.0,
            PriceTrend::Decreasing => 0.9,
        }
    }

    /// Bonus added to the market recommendation score
    pub fn score_bonus(self) -> f64 {
        match self {
            PriceTrend::Increasing => 0.3,
            PriceTrend::Stable => 0.2,
            PriceTrend::Decreasing => 0.1,
        }
    }
}

/// Price observation for one crop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysis {
    pub current_price: f64,
    pub avg_price: f64,
    /// Coefficient of variation (std / mean)
    pub price_volatility: f64,
    pub trend: PriceTrend,
}

impl PriceAnalysis {
    pub fn predicted_price(&self) -> f64 {
        self.current_price * self.trend.price_multiplier()
    }
}

/// Draw the current price and trend for a crop
pub fn analyze_price_trends<S>(entry: &CropCatalogEntry, signals: &mut S) -> PriceAnalysis
where
    S: MarketSignalSource + ?Sized,
{
    let current_price = signals.current_price(entry.price_mean, entry.price_std);
    let trend = signals.price_trend();

    PriceAnalysis {
        current_price,
        avg_price: entry.price_mean,
        price_volatility: entry.price_std / entry.price_mean,
        trend,
    }
}
