use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};
use std::hint::black_box;
use zsun_riders::services::derived;
use zsun_riders::RiderRepository;

const RIDER_COUNT: u64 = 2_000;

/// Synthetic dictionary with string-typed numbers, as upstream exports often are.
fn synthetic_riders_json() -> String {
    let entries: Map<String, Value> = (1..=RIDER_COUNT)
        .map(|i| {
            let id = (1_000_000 + i).to_string();
            let gender = if i % 3 == 0 { "f" } else { "m" };
            let raw = json!({
                "zwift_id": id,
                "name": format!("Rider {} Number{}", i % 97, i),
                "weight_kg": format!("{:.1}", 55.0 + (i % 40) as f64),
                "zwiftracingapp_zpFTP_w": 180 + (i % 200),
                "gender": gender,
                "zwift_cat_open": "B",
                "zwift_cat_female": "A",
                "zwift_zrs": i % 900,
                "zwiftracingapp_velo_rating_30_days": 1000 + i % 800,
                "zwiftracingapp_cat_num_30_days": i % 10,
                "zwiftracingapp_cat_name_30_days": "Sapphire",
                "zsun_when_curves_fitted": "2024-01-15T10:30:00Z"
            });
            (id, raw)
        })
        .collect();
    Value::Object(entries).to_string()
}

fn benchmark_repository(c: &mut Criterion) {
    let json = synthetic_riders_json();

    let mut repo = RiderRepository::new();
    repo.load(&json).expect("Failed to load synthetic riders");

    let mut group = c.benchmark_group("repository");

    group.bench_function("load_2000_riders", |b| {
        b.iter(|| {
            let mut repo = RiderRepository::new();
            repo.load(black_box(&json)).expect("load")
        })
    });

    group.bench_function("sorted_by_name", |b| {
        b.iter(|| black_box(&repo).get_all_sorted_by_name().len())
    });

    group.bench_function("summary_stats", |b| {
        b.iter(|| {
            repo.get_all_sorted_by_name()
                .into_iter()
                .map(|r| derived::summary_stats_01(black_box(r)).len())
                .sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_repository);
criterion_main!(benches);
