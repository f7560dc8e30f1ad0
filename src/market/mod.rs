//! Market analysis
//!
//! Per-crop market view built from three sub-analyses:
//! - `price_trend`: current price + trend (one draw each)
//! - `demand`: demand level + score + growth potential (one draw each)
//! - `profitability`: yield, cost, revenue from the same price draw
//!
//! **Recommendation score**: 0.4·roi + 0.3·demand_score + trend bonus
//! (0.3 Increasing / 0.2 Stable / 0.1 Decreasing)

pub mod demand;
pub mod price_trend;
pub mod profitability;
pub mod signals;

pub use demand::{predict_demand, DemandForecast, DemandLevel};
pub use price_trend::{analyze_price_trends, PriceAnalysis, PriceTrend};
pub use profitability::{calculate_profitability, ProfitabilityEstimate};
pub use signals::{MarketSignalSource, RandomSignals, StaticSignals};

use serde::{Deserialize, Serialize};

use crate::catalog::CropCatalog;
use crate::error::ScoringResult;

/// Confidence attached to simulated forecasts
pub const FORECAST_CONFIDENCE: f64 = 0.8;

const ROI_WEIGHT: f64 = 0.4;
const DEMAND_WEIGHT: f64 = 0.3;

/// Market trend for a crop in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub crop: String,
    pub region: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub demand_level: DemandLevel,
    pub price_trend: PriceTrend,
    pub confidence_score: f64,
}

/// Complete market view for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub crop: String,
    /// False when the crop was analysed with catalog fallback values
    pub known_crop: bool,
    pub market_trend: MarketTrend,
    pub demand: DemandForecast,
    pub profitability: ProfitabilityEstimate,
    pub recommendation_score: f64,
}

/// Market recommendation score from its three inputs
pub fn recommendation_score(roi: f64, demand_score: f64, trend: PriceTrend) -> f64 {
    ROI_WEIGHT * roi + DEMAND_WEIGHT * demand_score + trend.score_bonus()
}

/// Analyse the market for one crop
///
/// Draws exactly one price, trend, demand level and growth factor from
/// `signals`; every derived field is computed from those draws.
pub fn analyze_market<S>(
    catalog: &CropCatalog,
    crop: &str,
    region: &str,
    farm_size: f64,
    signals: &mut S,
) -> ScoringResult<MarketAnalysis>
where
    S: MarketSignalSource + ?Sized,
{
    let lookup = catalog.crop_or_default(crop);

    let price = analyze_price_trends(lookup.entry, signals);
    let demand = predict_demand(lookup.entry, signals);
    let profitability = calculate_profitability(lookup.entry, &price, farm_size)?;

    let market_trend = MarketTrend {
        crop: crop.to_string(),
        region: region.to_string(),
        current_price: price.current_price,
        predicted_price: price.predicted_price(),
        demand_level: demand.demand_level,
        price_trend: price.trend,
        confidence_score: FORECAST_CONFIDENCE,
    };

    Ok(MarketAnalysis {
        crop: crop.to_string(),
        known_crop: lookup.known,
        recommendation_score: recommendation_score(profitability.roi, demand.demand_score, price.trend),
        market_trend,
        demand,
        profitability,
    })
}

/// Market report for several crops, best recommendation score first
///
/// Ties keep the order of `crops`.
pub fn market_report<S>(
    catalog: &CropCatalog,
    crops: &[String],
    region: &str,
    farm_size: f64,
    signals: &mut S,
) -> ScoringResult<Vec<MarketAnalysis>>
where
    S: MarketSignalSource + ?Sized,
{
    let mut report = crops
        .iter()
        .map(|crop| analyze_market(catalog, crop, region, farm_size, signals))
        .collect::<ScoringResult<Vec<_>>>()?;

    report.sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Counts draws so tests can check each one happens once per crop
    #[derive(Default)]
    struct CountingSignals {
        prices: usize,
        trends: usize,
        demands: usize,
        growths: usize,
    }

    impl MarketSignalSource for CountingSignals {
        fn current_price(&mut self, mean: f64, _std_dev: f64) -> f64 {
            self.prices += 1;
            mean + self.prices as f64
        }

        fn price_trend(&mut self) -> PriceTrend {
            self.trends += 1;
            PriceTrend::Increasing
        }

        fn demand_level(&mut self) -> DemandLevel {
            self.demands += 1;
            DemandLevel::Low
        }

        fn growth_factor(&mut self) -> f64 {
            self.growths += 1;
            1.0
        }
    }

    #[test]
    fn test_wheat_recommendation_score() {
        let catalog = CropCatalog::default();
        let mut signals = StaticSignals::with_trend(PriceTrend::Stable);

        let analysis = analyze_market(&catalog, "wheat", "north", 5.0, &mut signals).unwrap();

        // 0.4·1.5 + 0.3·0.7 + 0.2
        assert_relative_eq!(analysis.recommendation_score, 1.01, epsilon = 1e-12);
        assert_eq!(analysis.market_trend.region, "north");
        assert_relative_eq!(analysis.market_trend.confidence_score, 0.8);
        assert_relative_eq!(analysis.market_trend.predicted_price, 300.0);
        assert_relative_eq!(analysis.profitability.estimated_yield, 15.0);
    }

    #[test]
    fn test_one_draw_per_signal() {
        let catalog = CropCatalog::default();
        let mut signals = CountingSignals::default();

        let analysis = analyze_market(&catalog, "rice", "delta", 2.0, &mut signals).unwrap();

        assert_eq!(
            (signals.prices, signals.trends, signals.demands, signals.growths),
            (1, 1, 1, 1)
        );

        // Trend, predicted price and revenue all come from the single price draw
        assert_relative_eq!(analysis.market_trend.current_price, 401.0);
        assert_relative_eq!(analysis.market_trend.predicted_price, 441.1, epsilon = 1e-9);
        assert_relative_eq!(analysis.profitability.potential_revenue, 9.0 * 401.0, epsilon = 1e-9);
        assert_eq!(analysis.market_trend.demand_level, analysis.demand.demand_level);
    }

    #[test]
    fn test_trend_bonus_ordering() {
        let inc = recommendation_score(1.5, 0.5, PriceTrend::Increasing);
        let stable = recommendation_score(1.5, 0.5, PriceTrend::Stable);
        let dec = recommendation_score(1.5, 0.5, PriceTrend::Decreasing);
        assert_relative_eq!(inc - stable, 0.1, epsilon = 1e-12);
        assert_relative_eq!(stable - dec, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_market_report_sorted() {
        let catalog = CropCatalog::default();
        let crops: Vec<String> = catalog.default_candidates();
        let mut signals = StaticSignals::default();

        let report = market_report(&catalog, &crops, "global", 10.0, &mut signals).unwrap();
        let order: Vec<&str> = report.iter().map(|r| r.crop.as_str()).collect();

        // demand scores: rice 0.8, corn 0.75, wheat 0.7, soybeans 0.65
        assert_eq!(order, vec!["rice", "corn", "wheat", "soybeans"]);
        assert!(report
            .windows(2)
            .all(|w| w[0].recommendation_score >= w[1].recommendation_score));
    }

    #[test]
    fn test_unknown_crop_is_flagged() {
        let catalog = CropCatalog::default();
        let mut signals = RandomSignals::seeded(5);
        let analysis = analyze_market(&catalog, "cassava", "global", 1.0, &mut signals).unwrap();
        assert!(!analysis.known_crop);
        assert_relative_eq!(analysis.demand.demand_score, 0.5);
    }
}
