use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vdotrs::{fitness, pace_zones, race_prediction, NormalizedPerformance, PerformanceRecord, VdotEngine};

/// Performance benchmarks for the VDOT calculation chain

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("VDOT Analysis");

    for &size in &[1, 10, 100, 1000] {
        let records = create_record_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("analyze", size), &records, |b, records| {
            b.iter(|| {
                for record in records {
                    let _ = VdotEngine::analyze(black_box(record));
                }
            });
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Calculation Stages");
    let performance = NormalizedPerformance {
        distance_meters: 10000.0,
        time_minutes: 40.0,
    };

    group.bench_function("estimate_fitness", |b| {
        b.iter(|| fitness::estimate(black_box(&performance)))
    });
    group.bench_function("generate_pace_zones", |b| {
        b.iter(|| pace_zones::generate(black_box(250.0)))
    });
    group.bench_function("predict_races", |b| {
        b.iter(|| race_prediction::predict(black_box(&performance)))
    });

    group.finish();
}

fn create_record_dataset(size: usize) -> Vec<PerformanceRecord> {
    (0..size)
        .map(|i| {
            let minutes = 35 + (i % 30);
            let unit = if i % 3 == 0 { "mile" } else { "km" };
            PerformanceRecord::new(5.0 + (i % 5) as f64, unit, format!("00:{:02}:{:02}", minutes, i % 60))
        })
        .collect()
}

criterion_group!(benches, bench_full_analysis, bench_stages);
criterion_main!(benches);
