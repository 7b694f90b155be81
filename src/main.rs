use log::{info, warn};
use logit::{
    make_two_clusters, train_test_split, ClassificationReport, LogisticRegression,
    LogisticRegressionConfig, MaxScaler, Predictions,
};

const ROUNDS: u64 = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (x, y) = make_two_clusters(150, 6, 0.45, 2024)?;
    // shift away from zero so the scaler has something to do
    let x = x.add_scalar(4.0);
    let x = MaxScaler::new().fit_transform(&x)?;

    let config = LogisticRegressionConfig::new()
        .with_learning_rate(0.001)
        .with_iterations(5_000)
        .with_tolerance(0.001)
        .with_l2(1.0)
        .with_verbose(false);
    let mut model = LogisticRegression::new(config)?;

    let mut predicted: Predictions = Vec::new();
    let mut actual: Predictions = Vec::new();

    for round in 0..ROUNDS {
        let split = train_test_split(&x, &y, 0.1, round)?;

        model.fit(&split.x_train, &split.y_train)?;
        if let Some(fitted) = model.model() {
            info!(
                "round {}: {} epochs, final cost {:?}",
                round,
                fitted.epochs_run(),
                fitted.final_cost()
            );
        }

        predicted.extend(model.predict_labels(&split.x_test)?);
        actual.extend(split.y_test.iter().map(|&v| v as usize));
    }

    let report = ClassificationReport::from_labels(&actual, &predicted)?;
    if report.accuracy < 0.5 {
        warn!("accuracy {:.2} is below chance", report.accuracy);
    }
    println!("{}", report);

    Ok(())
}
