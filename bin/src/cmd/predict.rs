//! Predict command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tactical_data::read_csv;
use tactical_signals::{create_predictor, write_submission};

use super::{print_banner, print_section};
use crate::settings::Settings;

/// Run a baseline predictor on the test set and save a submission.
pub(crate) fn run_predict(
    settings: &Settings,
    train: Option<PathBuf>,
    test: Option<PathBuf>,
    predictor_name: &str,
    weight: Option<f64>,
    id: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    print_banner("Baseline Prediction");

    let mut predictor_settings = settings.predictors.clone();
    if let Some(weight) = weight {
        predictor_settings.constant_weight = weight;
    }
    let predictor = create_predictor(predictor_name, &predictor_settings)?;

    let train_path = train.unwrap_or_else(|| settings.data.train_path());
    let test_path = test.unwrap_or_else(|| settings.data.test_path());
    let out_path = out.unwrap_or_else(|| settings.data.submission_dir.join("rule_pred.csv"));

    println!("Predictor: {}", predictor.name());
    println!("Train:     {}", train_path.display());
    println!("Test:      {}", test_path.display());
    println!();

    let train = read_csv(&train_path)?;
    let test = read_csv(&test_path)?;
    let id_column = match id {
        Some(id) => id,
        None => settings.data.resolve_id_column(&test)?,
    };

    let weights = predictor.predict(&test, &train)?;
    let submission = write_submission(&test, &id_column, &weights, &out_path)?;

    print_section("SUBMISSION");
    println!("Identifier: {id_column}");
    println!("Rows:       {}", submission.height());
    if let (Some(min), Some(max)) = (
        weights.iter().copied().reduce(f64::min),
        weights.iter().copied().reduce(f64::max),
    ) {
        println!("Weights:    [{min:.2}, {max:.2}], mean {:.4}", weights.mean().unwrap_or(f64::NAN));
    }
    println!();
    println!("{}", submission.head(Some(5)));
    println!("\nSaved {}", out_path.display());

    Ok(())
}
