//! SUSTAINABILITY ESTIMATE
//!
//! Combines four per-crop signals into `SustainabilityMetrics`:
//!   1. water_efficiency - 1 − water requirement / (2000 mm × farm size)
//!   2. soil_health - soil compatibility (0-1)
//!   3. carbon_footprint - fixed 0.7 until catalog-driven values exist
//!   4. biodiversity_impact - fixed 0.8 until catalog-driven values exist
//!
//! **Aggregate score**: 0.3·water + 0.3·soil + 0.2·carbon + 0.2·biodiversity
//!
//! water_efficiency is NOT clamped. Crops needing more than 2000 mm per season
//! score below zero, and a zero-requirement crop scores exactly 1. The ratio is
//! evaluated per hectare, so it is independent of farm size and cannot overflow.

use serde::{Deserialize, Serialize};

use crate::catalog::CropCatalog;
use crate::error::{check_farm_size, ScoringResult};
use crate::metrics::soil_compatibility::soil_compatibility;
use crate::metrics::water_requirement::water_requirement;

/// Seasonal water (mm) that maps to zero water efficiency
pub const WATER_NORMALIZATION_MM: f64 = 2000.0;

/// Placeholder scores until the catalog carries real values
pub const CARBON_FOOTPRINT_SCORE: f64 = 0.7;
pub const BIODIVERSITY_IMPACT_SCORE: f64 = 0.8;

/// Cost per unit of water requirement
pub const WATER_COST_FACTOR: f64 = 0.5;

const WATER_WEIGHT: f64 = 0.3;
const SOIL_WEIGHT: f64 = 0.3;
const CARBON_WEIGHT: f64 = 0.2;
const BIODIVERSITY_WEIGHT: f64 = 0.2;

/// Sustainability metrics for one (farmer, crop) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMetrics {
    /// May fall outside [0, 1] (see module docs)
    pub water_efficiency: f64,
    pub soil_health: f64,
    pub carbon_footprint: f64,
    pub biodiversity_impact: f64,
}

impl SustainabilityMetrics {
    /// Weighted sustainability score
    pub fn score(&self) -> f64 {
        WATER_WEIGHT * self.water_efficiency
            + SOIL_WEIGHT * self.soil_health
            + CARBON_WEIGHT * self.carbon_footprint
            + BIODIVERSITY_WEIGHT * self.biodiversity_impact
    }
}

/// Per-crop sustainability assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityResult {
    pub crop: String,
    /// False when the crop was scored with catalog fallback values
    pub known_crop: bool,
    pub sustainability_score: f64,
    pub water_requirement: f64,
    pub soil_compatibility: f64,
    pub estimated_cost: f64,
    pub metrics: SustainabilityMetrics,
}

/// Estimate sustainability metrics for a crop on a farm
pub fn estimate_sustainability(
    catalog: &CropCatalog,
    crop: &str,
    soil_type: &str,
    farm_size: f64,
) -> ScoringResult<SustainabilityMetrics> {
    check_farm_size(farm_size)?;

    // requirement / (cap × size) == base_mm / cap
    let base_mm = catalog.crop_or_default(crop).entry.water_requirement_mm;
    let water_efficiency = 1.0 - base_mm / WATER_NORMALIZATION_MM;

    Ok(SustainabilityMetrics {
        water_efficiency,
        soil_health: soil_compatibility(catalog, soil_type, crop),
        carbon_footprint: CARBON_FOOTPRINT_SCORE,
        biodiversity_impact: BIODIVERSITY_IMPACT_SCORE,
    })
}

/// Full sustainability assessment for one candidate crop
pub fn evaluate_crop(
    catalog: &CropCatalog,
    crop: &str,
    soil_type: &str,
    farm_size: f64,
) -> ScoringResult<SustainabilityResult> {
    let metrics = estimate_sustainability(catalog, crop, soil_type, farm_size)?;
    let water = water_requirement(catalog, crop, farm_size)?;

    Ok(SustainabilityResult {
        crop: crop.to_string(),
        known_crop: catalog.crop(crop).is_some(),
        sustainability_score: metrics.score(),
        water_requirement: water,
        soil_compatibility: metrics.soil_health,
        estimated_cost: water * WATER_COST_FACTOR,
        metrics,
    })
}

/// Order results by sustainability score, highest first (stable)
pub fn rank_by_sustainability(mut results: Vec<SustainabilityResult>) -> Vec<SustainabilityResult> {
    results.sort_by(|a, b| b.sustainability_score.total_cmp(&a.sustainability_score));
    results
}
