use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_advisor::{CropRecommender, FarmerProfile, RandomSignals, StaticSignals};

fn profile() -> FarmerProfile {
    FarmerProfile {
        name: "Bench".to_string(),
        location: "global".to_string(),
        farm_size: 25.0,
        soil_type: "loamy".to_string(),
        water_availability: "moderate".to_string(),
        preferred_crops: None,
        budget: 50_000.0,
    }
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = CropRecommender::default();
    let profile = profile();
    let crops: Vec<String> = (0..64)
        .map(|i| match i % 5 {
            0 => "rice".to_string(),
            1 => "wheat".to_string(),
            2 => "corn".to_string(),
            3 => "soybeans".to_string(),
            _ => format!("crop_{}", i),
        })
        .collect();

    c.bench_function("recommend_catalog_static", |b| {
        b.iter(|| {
            recommender
                .recommend_for_profile(black_box(&profile), "global", &mut StaticSignals::default())
                .unwrap()
        })
    });

    c.bench_function("recommend_64_candidates_random", |b| {
        let mut signals = RandomSignals::seeded(42);
        b.iter(|| {
            recommender
                .recommend(black_box(&profile), black_box(&crops), "global", &mut signals)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
