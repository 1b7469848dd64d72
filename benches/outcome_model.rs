//! 注文結果モデルのベンチマーク
//!
//! 抽選と分類、および待機なしの1回分の実行を測定

use criterion::{criterion_group, criterion_main, Criterion};
use order_pipeline::{
    core::OutcomeThresholds,
    engine::create_quiet_pipeline,
    services::{DefaultPipelineConfig, OrderWork, RandomOutcomeDecider, ScriptedOutcomeDecider},
};
use std::time::Duration;

/// 抽選と分類のベンチマーク
fn benchmark_outcome_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("Outcome Draw");
    let config = DefaultPipelineConfig::default();

    group.bench_function("RandomOutcomeDecider", |b| {
        let mut decider = RandomOutcomeDecider::seeded(42);
        let mut sequence_number = 0u32;
        b.iter(|| {
            sequence_number = sequence_number.wrapping_add(1);
            let work = OrderWork::draw(sequence_number, &config, &mut decider);
            std::hint::black_box(work)
        })
    });

    group.bench_function("classify", |b| {
        let thresholds = OutcomeThresholds::default();
        b.iter(|| {
            for roll in 0..=12 {
                std::hint::black_box(thresholds.classify(std::hint::black_box(roll)));
            }
        })
    });

    group.finish();
}

/// 待機なしでの1回分の実行のベンチマーク
fn benchmark_pipeline_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline Run");
    group.measurement_time(Duration::from_secs(10));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Failed to create runtime: {error}");
            return;
        }
    };
    let config = DefaultPipelineConfig::new(10).with_delay_unit(Duration::ZERO);
    let pipeline = create_quiet_pipeline(config);

    group.bench_function("10 orders", |b| {
        b.iter(|| {
            let summary = runtime.block_on(pipeline.run(ScriptedOutcomeDecider::new(0..10)));
            std::hint::black_box(summary)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_outcome_draw, benchmark_pipeline_run);
criterion_main!(benches);
