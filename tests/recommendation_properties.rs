// Recommendation engine properties
//
// Purpose: Exercise the public pipeline end to end with fixed and seeded
// market signals.
// Run with: cargo test --test recommendation_properties

use approx::assert_relative_eq;
use crop_advisor::combiner::overall_score;
use crop_advisor::metrics::{estimate_sustainability, soil_compatibility, water_requirement};
use crop_advisor::{
    CropCatalog, CropRecommender, FarmerProfile, PriceTrend, RandomSignals, ScoringError,
    StaticSignals,
};

fn profile(soil_type: &str, farm_size: f64) -> FarmerProfile {
    FarmerProfile {
        name: "Mei".to_string(),
        location: "Hubei".to_string(),
        farm_size,
        soil_type: soil_type.to_string(),
        water_availability: "high".to_string(),
        preferred_crops: None,
        budget: 10_000.0,
    }
}

fn names(crops: &[&str]) -> Vec<String> {
    crops.iter().map(|c| c.to_string()).collect()
}

// ============================================================================
// Section 1: Lookup-backed metrics
// ============================================================================

#[test]
fn test_soil_compatibility_bounded_for_all_supported_pairs() {
    let catalog = CropCatalog::default();
    for soil in ["clay", "sandy", "loamy", "silt"] {
        for crop in catalog.default_candidates() {
            let score = soil_compatibility(&catalog, soil, &crop);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}

#[test]
fn test_water_requirement_examples() {
    let catalog = CropCatalog::default();
    assert_relative_eq!(water_requirement(&catalog, "rice", 10.0).unwrap(), 15000.0);
    assert_relative_eq!(water_requirement(&catalog, "unknown_crop", 1.0).unwrap(), 500.0);
}

#[test]
fn test_wheat_clay_water_efficiency_is_exact() {
    let catalog = CropCatalog::default();
    let metrics = estimate_sustainability(&catalog, "wheat", "clay", 1.0).unwrap();
    assert_relative_eq!(metrics.water_efficiency, 0.775, epsilon = 1e-15);
}

#[test]
fn test_farm_size_boundaries() {
    let catalog = CropCatalog::default();

    let huge = estimate_sustainability(&catalog, "rice", "clay", 1e200).unwrap();
    assert!(huge.water_efficiency.is_finite());
    assert_relative_eq!(huge.water_efficiency, 0.25, epsilon = 1e-12);

    assert!(matches!(
        estimate_sustainability(&catalog, "rice", "clay", 0.0),
        Err(ScoringError::InvalidInput(_))
    ));
}

#[test]
fn test_huge_farm_is_ranked_with_saturated_totals() {
    let recommender = CropRecommender::default();
    let recs = recommender
        .recommend(
            &profile("clay", 1e306),
            &names(&["rice", "wheat"]),
            "global",
            &mut StaticSignals::default(),
        )
        .unwrap();

    assert_eq!(recs.len(), 2);
    for rec in &recs {
        assert!(rec.water_requirement.is_infinite());
        assert!(rec.estimated_cost.is_infinite());
        assert!(rec.profitability.potential_revenue.is_infinite());
        assert!(rec.sustainability_score.is_finite());
        assert!(rec.market_score.is_finite());
        assert!(rec.overall_score.is_finite());
    }
    assert!(recs[0].overall_score >= recs[1].overall_score);
}

// ============================================================================
// Section 2: Ranking
// ============================================================================

#[test]
fn test_loamy_scenario_sustainability_scores() {
    let recommender = CropRecommender::default();
    let recs = recommender
        .recommend(
            &profile("loamy", 5.0),
            &names(&["wheat", "corn"]),
            "global",
            &mut RandomSignals::seeded(1),
        )
        .unwrap();

    let score = |crop: &str| {
        recs.iter()
            .find(|r| r.crop == crop)
            .map(|r| r.sustainability_score)
            .unwrap()
    };

    // Deterministic regardless of market draws
    assert_relative_eq!(score("wheat"), 0.3 * 0.775 + 0.3 * 0.75 + 0.2 * 0.7 + 0.2 * 0.8, epsilon = 1e-12);
    assert_relative_eq!(score("corn"), 0.3 * 0.75 + 0.3 * 0.75 + 0.2 * 0.7 + 0.2 * 0.8, epsilon = 1e-12);
}

#[test]
fn test_output_sorted_for_many_seeds() {
    let recommender = CropRecommender::default();
    let crops = names(&["rice", "wheat", "corn", "soybeans", "sorghum", "millet"]);

    for seed in 0..50 {
        let recs = recommender
            .recommend(&profile("silt", 3.0), &crops, "global", &mut RandomSignals::seeded(seed))
            .unwrap();

        assert_eq!(recs.len(), crops.len());
        assert!(recs.windows(2).all(|w| w[0].overall_score >= w[1].overall_score));
    }
}

#[test]
fn test_overall_score_recomputes_from_parts() {
    let recommender = CropRecommender::default();
    let recs = recommender
        .recommend_for_profile(&profile("clay", 12.0), "global", &mut RandomSignals::seeded(9))
        .unwrap();

    for rec in &recs {
        assert_relative_eq!(
            rec.overall_score,
            0.4 * rec.sustainability_score + 0.6 * rec.market_score,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rec.overall_score,
            overall_score(rec.sustainability_score, rec.market_score),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_equal_scores_keep_candidate_order() {
    let recommender = CropRecommender::default();
    // Unknown crops share every fallback value, so they tie exactly
    let crops = names(&["kale", "beets", "okra"]);

    let recs = recommender
        .recommend(
            &profile("sandy", 2.0),
            &crops,
            "global",
            &mut StaticSignals::with_trend(PriceTrend::Increasing),
        )
        .unwrap();

    let order: Vec<&str> = recs.iter().map(|r| r.crop.as_str()).collect();
    assert_eq!(order, vec!["kale", "beets", "okra"]);
    assert!(recs.iter().all(|r| !r.known_crop));
}

#[test]
fn test_empty_candidates_return_empty() {
    let recommender = CropRecommender::default();
    let recs = recommender
        .recommend(&profile("clay", 1.0), &[], "global", &mut RandomSignals::seeded(0))
        .unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_custom_catalog_drives_ranking() {
    let json = r#"{ "crops": [
        { "name": "sorghum", "water_requirement_mm": 300, "carbon_footprint": 1.0,
          "base_yield": 3.5, "price_mean": 200, "price_std": 10, "base_demand_score": 0.9 },
        { "name": "sugarcane", "water_requirement_mm": 2500, "carbon_footprint": 3.0,
          "base_yield": 70, "price_mean": 35, "price_std": 3, "base_demand_score": 0.6 }
    ] }"#;
    let catalog = CropCatalog::from_json_str(json).unwrap();
    let recommender = CropRecommender::new(std::sync::Arc::new(catalog));

    let recs = recommender
        .recommend_for_profile(&profile("loamy", 4.0), "global", &mut StaticSignals::default())
        .unwrap();

    assert_eq!(recs[0].crop, "sorghum");
    assert_eq!(recs[1].crop, "sugarcane");
    assert!(recs[1].sustainability_metrics.water_efficiency < 0.0);
}
