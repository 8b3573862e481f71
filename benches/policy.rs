use criterion::{black_box, Criterion};
use flapper::{random::WyRng, Perceptron, Policy};

fn bench_evaluate(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0xB1_2D);
    let policy = Perceptron::random(6, &mut rng).unwrap();
    let observation = [0.31, -0.12];

    bench.bench_function("perceptron-evaluate", |b| {
        b.iter(|| policy.evaluate(black_box(observation)))
    });
}

fn bench_evaluate_wide(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(0xB1_2D);
    let policy = Perceptron::random(64, &mut rng).unwrap();
    let observation = [0.31, -0.12];

    bench.bench_function("perceptron-evaluate-64", |b| {
        b.iter(|| policy.evaluate(black_box(observation)))
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_evaluate(&mut criterion);
    bench_evaluate_wide(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
