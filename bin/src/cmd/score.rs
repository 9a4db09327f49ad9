//! Score command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Serialize;
use tactical_data::{DataConfig, read_csv};
use tactical_eval::{ScoreBreakdown, ScoreEngine};
use tactical_traits::{Dataset, TacticalError};
use tracing::warn;

use super::{dataset_name, print_banner, print_section};
use crate::OutputFormat;
use crate::settings::Settings;

/// Outcome for one submission file.
#[derive(Debug, Serialize)]
struct ScoreOutcome {
    submission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    join_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Score every submission against the solution, one at a time.
///
/// Without `id`, the join key is resolved from each submission's own columns.
/// A submission that cannot be scored is reported and the remaining ones are
/// still scored; the command then fails.
pub(crate) fn score_submissions(
    settings: &Settings,
    solution_path: &Path,
    submissions: &[PathBuf],
    id: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let solution = read_csv(solution_path)?;
    let engine = ScoreEngine::new(settings.score.clone());

    let outcomes: Vec<ScoreOutcome> = submissions
        .iter()
        .map(|path| {
            let mut join_key = None;
            let result = read_csv(path).and_then(|submission| {
                let id_key = submission_key(&settings.data, id.as_deref(), &submission)?;
                engine.evaluate(solution.data(), submission.data(), join_key.insert(id_key))
            });
            if let Err(e) = &result {
                warn!(submission = %path.display(), error = %e, "submission could not be scored");
            }
            outcome(path, join_key, result)
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        OutputFormat::Text => print_text(solution_path, &outcomes),
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        bail!("{failed} of {} submission(s) could not be scored", outcomes.len());
    }
    Ok(())
}

/// The explicit `id`, or the identifier column of the submission itself.
fn submission_key(
    config: &DataConfig,
    id: Option<&str>,
    submission: &Dataset,
) -> Result<String, TacticalError> {
    match id {
        Some(id) => Ok(id.to_string()),
        None => config.resolve_id_column(submission),
    }
}

fn outcome(
    path: &Path,
    join_key: Option<String>,
    result: Result<ScoreBreakdown, TacticalError>,
) -> ScoreOutcome {
    let submission = path.display().to_string();
    match result {
        Ok(breakdown) => ScoreOutcome {
            submission,
            join_key,
            breakdown: Some(breakdown),
            error: None,
        },
        Err(e) => ScoreOutcome {
            submission,
            join_key,
            breakdown: None,
            error: Some(e.to_string()),
        },
    }
}

fn print_text(solution_path: &Path, outcomes: &[ScoreOutcome]) {
    print_banner("Adjusted Sharpe Score");

    println!("Solution:  {}", solution_path.display());
    println!();

    for outcome in outcomes {
        print_section(&format!("SUBMISSION {}", dataset_name(Path::new(&outcome.submission))));
        if let Some(key) = &outcome.join_key {
            println!("Join key: {key}\n");
        }
        match (&outcome.breakdown, &outcome.error) {
            (Some(b), _) => print_breakdown(b),
            (None, Some(e)) => println!("Error: {e}\n"),
            (None, None) => {}
        }
    }
}

fn print_breakdown(b: &ScoreBreakdown) {
    println!("Periods scored: {}\n", b.n_periods);

    println!("{:<24} {:>14} {:>14}", "", "Strategy", "Market");
    println!("{}", "─".repeat(54));
    println!(
        "{:<24} {:>14.6} {:>14.6}",
        "Mean excess return", b.strategy.mean_excess_return, b.market.mean_excess_return
    );
    println!(
        "{:<24} {:>14} {:>14}",
        "Mean kind",
        format!("{:?}", b.strategy.mean_kind),
        format!("{:?}", b.market.mean_kind)
    );
    println!(
        "{:<24} {:>13.2}% {:>13.2}%",
        "Annualized volatility", b.strategy.annualized_volatility, b.market.annualized_volatility
    );
    println!(
        "{:<24} {:>14.4} {:>14.4}",
        "Sharpe ratio", b.strategy.sharpe, b.market.sharpe
    );
    println!();

    println!("Penalties:");
    println!("  Excess volatility:    {:>10.4}", b.penalties.excess_vol);
    println!("  Volatility penalty:   {:>10.4}", b.penalties.vol_penalty);
    println!("  Return gap:           {:>10.4}", b.penalties.return_gap);
    println!("  Return penalty:       {:>10.4}", b.penalties.return_penalty);
    println!();

    if b.capped {
        println!("Uncapped score:         {:.4} (capped)", b.uncapped_score);
    }
    println!("ADJUSTED SHARPE:        {:.6}\n", b.adjusted_sharpe);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_scores_all_submissions_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let solution = write(
            dir.path(),
            "solution.csv",
            "date_id,forward_returns,risk_free_rate\n0,0.01,0.0001\n1,-0.02,0.0001\n2,0.015,0.0001\n",
        );
        let good = write(dir.path(), "good.csv", "date_id,prediction\n0,1.0\n1,0.5\n2,1.5\n");
        let bad = write(dir.path(), "bad.csv", "date_id,prediction\n0,1.0\n1,2.5\n2,1.0\n");

        let settings = Settings::default();
        let ok = score_submissions(
            &settings,
            &solution,
            std::slice::from_ref(&good),
            None,
            OutputFormat::Json,
        );
        assert!(ok.is_ok());

        let err = score_submissions(&settings, &solution, &[good, bad], None, OutputFormat::Text)
            .unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn test_join_key_comes_from_each_submission() {
        let dir = tempfile::tempdir().unwrap();
        // `row_id` would win on the solution's columns but is absent from the submission.
        let solution = write(
            dir.path(),
            "solution.csv",
            "row_id,date_id,forward_returns,risk_free_rate\n\
             a,0,0.01,0.0001\nb,1,-0.02,0.0001\nc,2,0.015,0.0001\n",
        );
        let submission = write(dir.path(), "sub.csv", "date_id,prediction\n0,1.0\n1,0.5\n2,1.5\n");

        let settings = Settings::default();
        let parsed = read_csv(&submission).unwrap();
        assert_eq!(submission_key(&settings.data, None, &parsed).unwrap(), "date_id");
        assert_eq!(submission_key(&settings.data, Some("row_id"), &parsed).unwrap(), "row_id");

        let scored = score_submissions(
            &settings,
            &solution,
            std::slice::from_ref(&submission),
            None,
            OutputFormat::Json,
        );
        assert!(scored.is_ok());
    }

    #[test]
    fn test_outcome_serialization() {
        let failed = outcome(
            Path::new("sub.csv"),
            None,
            Err(TacticalError::MissingPrediction { count: 2 }),
        );
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["submission"], "sub.csv");
        assert!(json.get("breakdown").is_none());
        assert!(json.get("join_key").is_none());
        assert!(json["error"].as_str().unwrap().contains("Missing predictions"));
    }
}
