// Criterion benchmarks for the Trip Buddy recommender

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use trip_buddy::core::{normalize::NormalizedPreferences, scoring::calculate_place_score, Recommender};
use trip_buddy::models::{Place, PriceLevel, ScoringWeights, UserPreferences};

const TAG_POOL: &[&str] = &[
    "beach", "history", "museum", "nightlife", "club", "hiking", "food", "seafood",
    "family", "kids", "spa", "church", "sunset", "boat", "market",
];

fn create_place(id: usize) -> Place {
    let mut place = Place::new(format!("Place {}", id), TAG_POOL[id % TAG_POOL.len()]);
    place.id = id.to_string();
    place.description = Some(format!(
        "A spot known for {} and {}",
        TAG_POOL[(id * 3) % TAG_POOL.len()],
        TAG_POOL[(id * 7) % TAG_POOL.len()]
    ));
    place.tags = (0..4)
        .map(|k| TAG_POOL[(id + k * 5) % TAG_POOL.len()].to_string())
        .collect();
    place.price_level = Some(match id % 3 {
        0 => PriceLevel::Low,
        1 => PriceLevel::Medium,
        _ => PriceLevel::High,
    });
    place.rating = Some((id % 50) as f64 / 10.0);
    place
}

fn create_preferences() -> UserPreferences {
    UserPreferences {
        interests: vec!["beach".to_string(), "history".to_string(), "seafood".to_string()],
        budget: PriceLevel::Low,
        travel_style: Some("relaxed".to_string()),
    }
}

fn bench_place_score(c: &mut Criterion) {
    let place = create_place(7);
    let prefs = NormalizedPreferences::from_preferences(&create_preferences());
    let weights = ScoringWeights::default();

    c.bench_function("calculate_place_score", |b| {
        b.iter(|| calculate_place_score(black_box(&place), black_box(&prefs), black_box(&weights)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("ranking");

    for place_count in [10, 50, 100, 500, 1000].iter() {
        let places: Vec<Place> = (0..*place_count).map(create_place).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", place_count),
            place_count,
            |b, _| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| {
                    recommender.rank_with_rng(
                        black_box(&places),
                        black_box(&preferences),
                        black_box(5),
                        &mut rng,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_place_score, bench_ranking);

criterion_main!(benches);
