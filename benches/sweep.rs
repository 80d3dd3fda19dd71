use criterion::BatchSize;
use criterion::Criterion;
use criterion::{criterion_group, criterion_main};
use mixgibbs::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn bench_label_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("Label resample");
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let xs: Vec<f64> = Gaussian::new(0.0, 9.0, 0.0, 1.0)
        .unwrap()
        .sample(1_000, &mut rng)
        .unwrap();

    for k in [2, 5, 10, 20] {
        let components: Vec<Gaussian> = (0..k)
            .map(|_| Gaussian::from_prior(1.0, 0.0, 9.0, &mut rng).unwrap())
            .collect();
        let weights = Categorical::symmetric(k, 1.0, &mut rng).unwrap();
        let asgn =
            LabelAssignment::new(&xs, &components, &weights, &mut rng).unwrap();

        group.bench_function(format!("n = 1000, k = {k}"), |b| {
            b.iter_batched_ref(
                || (asgn.clone(), rand::thread_rng()),
                |(asgn, rng)| {
                    asgn.resample(&components, &weights, rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mixture sweep");
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let mut xs: Vec<f64> = Gaussian::new(-3.0, 1.0, 0.0, 1.0)
        .unwrap()
        .sample(500, &mut rng)
        .unwrap();
    let ys: Vec<f64> = Gaussian::new(3.0, 1.0, 0.0, 1.0)
        .unwrap()
        .sample(500, &mut rng)
        .unwrap();
    xs.extend(ys);

    for k in [2, 5, 10] {
        let config = MixtureConfig::symmetric(k, 1.0, 0.0, 9.0, 1.0);
        let mut model = MixtureModel::gaussian(&config, &mut rng).unwrap();
        model.add_data(&xs, &mut rng).unwrap();

        group.bench_function(format!("n = 1000, k = {k}"), |b| {
            b.iter_batched_ref(
                || (model.clone(), rand::thread_rng()),
                |(model, rng)| {
                    model.resample_model(rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(sweep_benches, bench_label_resample, bench_sweep);
criterion_main!(sweep_benches);
