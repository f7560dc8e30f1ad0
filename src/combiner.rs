//! Recommendation Combiner
//!
//! Joins per-crop sustainability and market results into the final ranked
//! list.
//!
//! **Overall score**: 0.4 × sustainability_score + 0.6 × recommendation_score
//!
//! The join is keyed by crop name (case-insensitive), not by position, so a
//! stage that reorders its output cannot misalign scores. Anything that does
//! not pair up one-to-one is an `InconsistentState` error.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ScoringError, ScoringResult};
use crate::market::{MarketAnalysis, MarketTrend, ProfitabilityEstimate};
use crate::metrics::{SustainabilityMetrics, SustainabilityResult};

pub const SUSTAINABILITY_WEIGHT: f64 = 0.4;
pub const MARKET_WEIGHT: f64 = 0.6;

/// One ranked crop recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub crop: String,
    /// False when either stage fell back to default catalog values
    pub known_crop: bool,
    pub sustainability_score: f64,
    pub market_score: f64,
    pub overall_score: f64,
    pub water_requirement: f64,
    pub estimated_cost: f64,
    pub sustainability_metrics: SustainabilityMetrics,
    pub market_trend: MarketTrend,
    pub profitability: ProfitabilityEstimate,
}

/// Blend of sustainability and market scores used as the ranking key
pub fn overall_score(sustainability_score: f64, market_score: f64) -> f64 {
    SUSTAINABILITY_WEIGHT * sustainability_score + MARKET_WEIGHT * market_score
}

/// Combine stage results into recommendations, best first
///
/// Output ties keep the order of `sustainability`.
pub fn combine(
    sustainability: Vec<SustainabilityResult>,
    market: Vec<MarketAnalysis>,
) -> ScoringResult<Vec<CropRecommendation>> {
    if sustainability.len() != market.len() {
        return Err(ScoringError::InconsistentState(format!(
            "{} sustainability results but {} market results",
            sustainability.len(),
            market.len()
        )));
    }

    let mut by_crop: FxHashMap<String, MarketAnalysis> = FxHashMap::default();
    for analysis in market {
        let key = analysis.crop.to_lowercase();
        if by_crop.contains_key(&key) {
            return Err(ScoringError::InconsistentState(format!(
                "duplicate market result for crop '{}'",
                analysis.crop
            )));
        }
        by_crop.insert(key, analysis);
    }

    let mut recommendations = Vec::with_capacity(sustainability.len());
    for result in sustainability {
        let analysis = by_crop.remove(&result.crop.to_lowercase()).ok_or_else(|| {
            ScoringError::InconsistentState(format!(
                "no market result for crop '{}'",
                result.crop
            ))
        })?;

        recommendations.push(CropRecommendation {
            overall_score: overall_score(result.sustainability_score, analysis.recommendation_score),
            known_crop: result.known_crop && analysis.known_crop,
            sustainability_score: result.sustainability_score,
            market_score: analysis.recommendation_score,
            water_requirement: result.water_requirement,
            estimated_cost: result.estimated_cost,
            sustainability_metrics: result.metrics,
            market_trend: analysis.market_trend,
            profitability: analysis.profitability,
            crop: result.crop,
        });
    }

    // Stable: equal scores keep input order
    recommendations.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));
    Ok(recommendations)
}
