use mixgibbs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

const N_TRIALS: usize = 20;

#[test]
fn gaussian_resample_recovers_mean() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
    let truth = Gaussian::new(0.0, 1.0, 0.0, 2.0).unwrap();

    for _ in 0..N_TRIALS {
        let xs: Vec<f64> = truth.sample(1000, &mut rng).unwrap();
        let mut gauss = Gaussian::from_prior(1.0, 0.0, 2.0, &mut rng).unwrap();
        gauss.resample(&xs, &mut rng).unwrap();
        assert!(gauss.mu().abs() < 0.2, "mu = {}", gauss.mu());
    }
}

#[test]
fn gaussian_resample_on_rows() {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let truth = Gaussian::new(-2.0, 1.0, 0.0, 2.0).unwrap();
    let rows: Vec<Vec<f64>> = truth.sample(1000, &mut rng).unwrap();

    let mut gauss = Gaussian::new(0.0, 1.0, 0.0, 2.0).unwrap();
    gauss.resample(&rows, &mut rng).unwrap();
    assert::close(gauss.mu(), -2.0, 0.2);
}

#[test]
fn categorical_resample_recovers_weights() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
    let pi = vec![0.05, 0.1, 0.15, 0.2, 0.2, 0.3];
    let truth = Categorical::new(&pi, vec![1.0; 6]).unwrap();
    let xs: Vec<usize> = truth.sample(10_000, &mut rng).unwrap();

    let mut cat = Categorical::symmetric(6, 1.0, &mut rng).unwrap();
    cat.resample(&xs, &mut rng).unwrap();

    let l1: f64 = cat
        .weights()
        .iter()
        .zip(pi.iter())
        .map(|(a, b)| (a - b).abs())
        .sum();
    assert!(l1 < 0.05, "L1 = {l1}");
}

#[test]
fn categorical_rejects_out_of_range_data() {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let mut cat = Categorical::symmetric(3, 1.0, &mut rng).unwrap();
    let xs: Vec<u8> = vec![0, 1, 3];
    let err = cat.resample(&xs, &mut rng).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainError);
}

#[test]
fn mixture_recovers_separated_clusters() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0x5678);
    let left = Gaussian::new(-4.0, 1.0, 0.0, 1.0).unwrap();
    let right = Gaussian::new(4.0, 1.0, 0.0, 1.0).unwrap();
    let mut xs: Vec<f64> = left.sample(150, &mut rng).unwrap();
    let ys: Vec<f64> = right.sample(50, &mut rng).unwrap();
    xs.extend(ys);

    let config = MixtureConfig::symmetric(2, 1.0, 0.0, 16.0, 1.0);
    let mut model = MixtureModel::gaussian(&config, &mut rng).unwrap();
    model.add_data(&xs, &mut rng).unwrap();
    model.run(200, &mut rng).unwrap();

    let (lo, hi) = if model.components()[0].mu() < model.components()[1].mu()
    {
        (0, 1)
    } else {
        (1, 0)
    };
    assert::close(model.components()[lo].mu(), -4.0, 0.5);
    assert::close(model.components()[hi].mu(), 4.0, 0.5);
    assert::close(model.weights().weights()[lo], 0.75, 0.1);

    // Labels agree with the cluster each point came from
    let labels = model.labels(0).unwrap();
    let n_right = labels
        .iter()
        .enumerate()
        .filter(|&(ix, &z)| (ix < 150 && z == lo) || (ix >= 150 && z == hi))
        .count();
    assert!(n_right >= 195, "{n_right} correctly labeled");
}

#[test]
fn responsibilities_rows_sum_to_one() {
    let mut rng = SmallRng::seed_from_u64(0x1234);
    let truth = Gaussian::new(0.0, 4.0, 0.0, 1.0).unwrap();
    let xs: Vec<f64> = truth.sample(100, &mut rng).unwrap();

    let config = MixtureConfig::symmetric(5, 1.0, 0.0, 4.0, 1.0);
    let mut model = MixtureModel::gaussian(&config, &mut rng).unwrap();
    model.add_data(&xs, &mut rng).unwrap();
    model.run(5, &mut rng).unwrap();

    let rs = model.assignments()[0]
        .responsibilities(model.components(), model.weights())
        .unwrap();
    assert_eq!(rs.len(), 100);
    rs.iter().for_each(|r| {
        assert_eq!(r.len(), 5);
        assert::close(r.iter().sum::<f64>(), 1.0, 1E-10);
    });
}

#[test]
fn seeded_runs_are_reproducible() {
    let xs: Vec<f64> = vec![-3.1, -2.9, -3.0, 2.8, 3.2, 3.1, 0.1];
    let config = MixtureConfig::symmetric(3, 1.0, 0.0, 9.0, 1.0);

    let fit = |seed: u64| {
        let mut rng = Xoshiro256Plus::seed_from_u64(seed);
        let mut model = MixtureModel::gaussian(&config, &mut rng).unwrap();
        model.add_data(&xs, &mut rng).unwrap();
        model.run(25, &mut rng).unwrap();
        (
            model.labels(0).unwrap().to_vec(),
            model.weights().weights().to_vec(),
        )
    };

    assert_eq!(fit(0x1234), fit(0x1234));
}
