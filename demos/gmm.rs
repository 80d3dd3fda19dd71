use mixgibbs::prelude::*;

// Finite mixture of two univariate Gaussians with known variance
fn main() -> Result<()> {
    let mut rng = rand::thread_rng();

    let left = Gaussian::new(-3.0, 1.0, 0.0, 1.0)?;
    let right = Gaussian::new(3.0, 1.0, 0.0, 1.0)?;
    let mut xs: Vec<f64> = left.sample(50, &mut rng)?;
    let ys: Vec<f64> = right.sample(50, &mut rng)?;
    xs.extend(ys);

    let config = MixtureConfig::symmetric(2, 1.0, 0.0, 10.0, 1.0);
    let mut model = MixtureModel::gaussian(&config, &mut rng)?;
    model.add_data(&xs, &mut rng)?;

    for iter in 0..20 {
        model.run(10, &mut rng)?;
        let score = model.ln_score()?;
        println!("iter {:3}: ln score = {score:.3}", 10 * (iter + 1));
    }

    model
        .components()
        .iter()
        .zip(model.weights().weights())
        .for_each(|(cpnt, w)| println!("{cpnt} with weight {w:.3}"));

    // the first half should share one label, and the second half the other
    println!("{:?}", model.labels(0).unwrap_or_default());
    Ok(())
}
