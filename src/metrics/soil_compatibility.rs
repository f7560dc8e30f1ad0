//! SOIL COMPATIBILITY
//!
//! Scores how well a soil class holds water and nutrients. The score is the
//! mean of the soil's water and nutrient retention, so it stays within [0, 1]
//! whenever the retention table does.
//!
//! The crop argument is accepted but does not yet influence the score: there
//! is no crop-soil interaction model behind it, only the soil's own
//! retention. Callers should not read a crop-specific signal into it.

use crate::catalog::CropCatalog;

/// Soil compatibility (0-1) for a soil type and crop
///
/// Unknown soil types use the catalog's fallback retention (0.5, 0.5).
pub fn soil_compatibility(catalog: &CropCatalog, soil_type: &str, _crop: &str) -> f64 {
    let retention = catalog.soil(soil_type);
    (retention.water_retention + retention.nutrient_retention) / 2.0
}
