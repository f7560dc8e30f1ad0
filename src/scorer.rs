//! Crop Recommender - Main coordinator for scoring candidate crops
//!
//! Runs the full pipeline for one farmer:
//!   1. Validate the profile and de-duplicate candidates
//!   2. Sustainability per crop (pure; evaluated in parallel with Rayon)
//!   3. Market analysis per crop (sequential; consumes the signal source)
//!   4. Combine by crop name, rank by overall score
//!
//! The recommender holds only the immutable catalog, so one instance can be
//! shared across threads and requests.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::Arc;

use crate::catalog::CropCatalog;
use crate::combiner::{combine, CropRecommendation};
use crate::error::ScoringResult;
use crate::market::{analyze_market, market_report, MarketAnalysis, MarketSignalSource};
use crate::metrics::{evaluate_crop, SustainabilityResult};
use crate::profile::FarmerProfile;

/// Main crop recommender
#[derive(Debug, Clone)]
pub struct CropRecommender {
    catalog: Arc<CropCatalog>,
}

impl Default for CropRecommender {
    fn default() -> Self {
        Self::new(Arc::new(CropCatalog::default()))
    }
}

impl CropRecommender {
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Rank `candidates` for a farmer, best overall score first
    ///
    /// # Arguments
    /// * `profile` - Farmer and farm being advised
    /// * `candidates` - Crop names to score; duplicates (case-insensitive) are dropped
    /// * `region` - Market region passed through to the market analysis
    /// * `signals` - Market signal source (random simulation or fixed test signals)
    ///
    /// # Errors
    /// `InvalidInput` for a non-positive farm size. An empty candidate list
    /// returns an empty ranking.
    pub fn recommend<S>(
        &self,
        profile: &FarmerProfile,
        candidates: &[String],
        region: &str,
        signals: &mut S,
    ) -> ScoringResult<Vec<CropRecommendation>>
    where
        S: MarketSignalSource + ?Sized,
    {
        profile.validate()?;

        let crops = dedup_candidates(candidates);
        if crops.is_empty() {
            return Ok(Vec::new());
        }

        let sustainability = self.sustainability_stage(profile, &crops)?;
        let market = crops
            .iter()
            .map(|crop| analyze_market(&self.catalog, crop, region, profile.farm_size, signals))
            .collect::<ScoringResult<Vec<MarketAnalysis>>>()?;

        let recommendations = combine(sustainability, market)?;

        tracing::debug!(
            "Ranked {} crops for '{}' (top: {})",
            recommendations.len(),
            profile.name,
            recommendations.first().map(|r| r.crop.as_str()).unwrap_or("-")
        );

        Ok(recommendations)
    }

    /// Rank the farmer's preferred crops, or the whole catalog without preferences
    pub fn recommend_for_profile<S>(
        &self,
        profile: &FarmerProfile,
        region: &str,
        signals: &mut S,
    ) -> ScoringResult<Vec<CropRecommendation>>
    where
        S: MarketSignalSource + ?Sized,
    {
        let candidates = profile.candidate_crops(&self.catalog);
        self.recommend(profile, &candidates, region, signals)
    }

    /// Sustainability assessments in candidate order
    pub fn sustainability_stage(
        &self,
        profile: &FarmerProfile,
        crops: &[String],
    ) -> ScoringResult<Vec<SustainabilityResult>> {
        // Each crop is independent and reads only the shared catalog
        crops
            .par_iter()
            .map(|crop| evaluate_crop(&self.catalog, crop, &profile.soil_type, profile.farm_size))
            .collect()
    }

    /// Market report for a region, best recommendation score first
    pub fn market_report<S>(
        &self,
        crops: &[String],
        region: &str,
        farm_size: f64,
        signals: &mut S,
    ) -> ScoringResult<Vec<MarketAnalysis>>
    where
        S: MarketSignalSource + ?Sized,
    {
        market_report(&self.catalog, &dedup_candidates(crops), region, farm_size, signals)
    }
}

/// Drop repeated crop names (case-insensitive), keeping the first spelling
fn dedup_candidates(candidates: &[String]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    candidates
        .iter()
        .filter(|c| seen.insert(c.to_lowercase()))
        .cloned()
        .collect()
}
