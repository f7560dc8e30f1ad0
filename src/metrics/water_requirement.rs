//! WATER REQUIREMENT
//!
//! Seasonal water need for a farm: the crop's base requirement (mm per
//! season) scaled by farm size. Unknown crops use the catalog fallback
//! (500 mm).
//!
//! The product is not clamped: a farm large enough to overflow `f64` gets an
//! infinite requirement, the same as every other farm-size-scaled total.

use crate::catalog::CropCatalog;
use crate::error::{check_farm_size, ScoringResult};

/// Water requirement for `crop` on `farm_size` hectares
///
/// # Errors
/// `InvalidInput` when farm size is not a positive finite number.
pub fn water_requirement(catalog: &CropCatalog, crop: &str, farm_size: f64) -> ScoringResult<f64> {
    check_farm_size(farm_size)?;

    let base = catalog.crop_or_default(crop).entry.water_requirement_mm;
    Ok(base * farm_size)
}
