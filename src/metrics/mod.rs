//! Sustainability metric modules
//!
//! Each metric is implemented in its own module:
//! - `soil_compatibility`: soil retention → compatibility (0-1)
//! - `water_requirement`: seasonal water need for a farm
//! - `sustainability`: combines the above with carbon and biodiversity

pub mod soil_compatibility;
pub mod water_requirement;
pub mod sustainability;

// Re-export metric functions
pub use soil_compatibility::soil_compatibility;
pub use water_requirement::water_requirement;
pub use sustainability::{
    estimate_sustainability, evaluate_crop, rank_by_sustainability, SustainabilityMetrics,
    SustainabilityResult,
};
