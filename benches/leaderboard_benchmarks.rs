use ardra_leaderboard::services::leaderboard::{compute, compute_per_dex};
use ardra_leaderboard::{ParticipantRecord, RateConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::Value;
use std::collections::BTreeMap;
use std::hint::black_box;

/// A referral forest where every tenth participant recruits the next nine
fn participants(count: usize) -> Vec<ParticipantRecord> {
    (0..count)
        .map(|i| {
            let record = ParticipantRecord::new(
                format!("REF{i:06}"),
                (i % 997) as f64 * 3.5,
                (i % 389) as f64 * 1.25,
            );
            if i % 10 == 0 {
                record
            } else {
                record.referred_by(format!("REF{:06}", i - i % 10))
            }
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let rates = RateConfig::default();

    for size in [100, 1_000, 10_000] {
        let records = participants(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| compute(black_box(records), black_box(&rates)))
        });
    }
    group.finish();
}

fn bench_per_dex(c: &mut Criterion) {
    let rates = RateConfig {
        per_dex_referral_points_rate: Some(0.1),
        ..RateConfig::default()
    };
    let segment = serde_json::to_value(participants(2_000)).unwrap_or(Value::Null);
    let segments: BTreeMap<String, Value> = ["jupiter", "meteora", "orca", "raydium"]
        .into_iter()
        .map(|name| (name.to_string(), segment.clone()))
        .collect();

    c.bench_function("compute_per_dex/4x2000", |b| {
        b.iter(|| compute_per_dex(black_box(&segments), black_box(&rates)))
    });
}

criterion_group!(benches, bench_compute, bench_per_dex);
criterion_main!(benches);
