//! Farmer profile
//!
//! Immutable input to a scoring run. Owned by the caller; the engine only
//! borrows it.

use serde::{Deserialize, Serialize};

use crate::catalog::CropCatalog;
use crate::error::{check_farm_size, ScoringResult};

/// A farmer and their farm, as supplied to the recommender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub name: String,
    pub location: String,
    /// Farm size in hectares (> 0)
    pub farm_size: f64,
    /// Soil class, e.g. "clay", "sandy", "loamy", "silt"
    pub soil_type: String,
    /// Water availability category, e.g. "low", "moderate", "high"
    pub water_availability: String,
    #[serde(default)]
    pub preferred_crops: Option<Vec<String>>,
    pub budget: f64,
}

impl FarmerProfile {
    /// Check the profile can be scored
    pub fn validate(&self) -> ScoringResult<()> {
        check_farm_size(self.farm_size)
    }

    /// Crops to score for this farmer
    ///
    /// Preferred crops when the farmer listed any, otherwise every crop in
    /// the catalog.
    pub fn candidate_crops(&self, catalog: &CropCatalog) -> Vec<String> {
        match &self.preferred_crops {
            Some(crops) if !crops.is_empty() => crops.clone(),
            _ => catalog.default_candidates(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_profile(soil_type: &str, farm_size: f64) -> FarmerProfile {
    FarmerProfile {
        name: "Asha".to_string(),
        location: "Punjab".to_string(),
        farm_size,
        soil_type: soil_type.to_string(),
        water_availability: "moderate".to_string(),
        preferred_crops: None,
        budget: 10_000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;

    #[test]
    fn test_validate_rejects_zero_farm_size() {
        assert!(test_profile("clay", 2.0).validate().is_ok());
        assert!(matches!(
            test_profile("clay", 0.0).validate(),
            Err(ScoringError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_candidate_crops() {
        let catalog = CropCatalog::default();
        let mut profile = test_profile("silt", 3.0);
        assert_eq!(profile.candidate_crops(&catalog).len(), 4);

        // An empty preference list behaves like no preference
        profile.preferred_crops = Some(vec![]);
        assert_eq!(profile.candidate_crops(&catalog).len(), 4);

        profile.preferred_crops = Some(vec!["corn".to_string()]);
        assert_eq!(profile.candidate_crops(&catalog), vec!["corn"]);
    }

    #[test]
    fn test_deserialize_without_preferences() {
        let json = r#"{
            "name": "Tomas", "location": "Iowa", "farm_size": 40.0,
            "soil_type": "silt", "water_availability": "high", "budget": 25000
        }"#;
        let profile: FarmerProfile = serde_json::from_str(json).unwrap();
        assert!(profile.preferred_crops.is_none());
        assert_eq!(profile.soil_type, "silt");
    }
}
