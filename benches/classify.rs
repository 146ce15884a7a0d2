//! Benchmarks for configuring the pod classifier and grading pods.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cacao_fuzzy::config::PodConfig;
use cacao_fuzzy::{classify, configure, configure_with};

fn bench_configure(c: &mut Criterion) {
    c.bench_function("configure", |b| b.iter(|| configure().unwrap()));
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for step in [1.0, 0.1, 0.01] {
        let mut config = PodConfig::default();
        config.grade.step = step;
        let pod = configure_with(&config).unwrap();

        group.bench_with_input(BenchmarkId::new("grade_step", step), &pod, |b, pod| {
            b.iter(|| classify(pod, black_box(17.5), black_box(9.), black_box(640.), black_box(35.)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_configure, bench_classify);
criterion_main!(benches);
