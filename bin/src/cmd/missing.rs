//! Missing-value diagnostics command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tactical_data::{MissingReport, read_csv};

use super::{dataset_name, dataset_paths, print_banner, print_section};
use crate::OutputFormat;
use crate::settings::Settings;

/// Number of dates shown at each end of the over-time profile.
const DATE_EDGE_ROWS: usize = 5;

/// Diagnose missing values in each dataset and save the summaries.
pub(crate) fn missing_report(
    settings: &Settings,
    paths: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    top: usize,
    format: OutputFormat,
) -> Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| settings.data.output_dir.clone());
    let mut reports = Vec::new();

    if format == OutputFormat::Text {
        print_banner("Missing Value Diagnostics");
    }

    for path in dataset_paths(settings, paths) {
        let dataset = read_csv(&path)?;
        let name = dataset_name(&path);
        if format == OutputFormat::Text {
            let (rows, cols) = dataset.shape();
            println!("Loaded {name} shape: ({rows}, {cols})");
        }

        let report = MissingReport::compute(&name, dataset.data(), &settings.missing)?;
        report.save(&out_dir)?;
        reports.push(report);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            println!();
            for report in &reports {
                print_report(report, top);
            }
            println!("Saved missing data summaries to {}", out_dir.display());
        }
    }

    Ok(())
}

fn print_report(report: &MissingReport, top: usize) {
    print_section(&format!("MISSING VALUES: {}", report.name));

    println!("{:<32} {:>14} {:>16}", "Column", "Missing count", "Missing percent");
    println!("{}", "─".repeat(64));
    for column in report.columns.iter().take(top) {
        println!(
            "{:<32} {:>14} {:>15.2}%",
            column.column, column.missing_count, column.missing_percent
        );
    }
    println!(
        "\nTotal columns with missing values: {} / {}\n",
        report.columns_with_missing,
        report.total_columns()
    );

    let summary = &report.per_row_summary;
    println!("Missing data per row:");
    println!("  {:<8} {:>10}", "count", summary.count);
    println!("  {:<8} {:>10.4}", "mean", summary.mean);
    println!("  {:<8} {:>10.4}", "std", summary.std);
    println!("  {:<8} {:>10.4}", "min", summary.min);
    for (q, value) in &summary.quantiles {
        println!("  {:<8} {:>10.4}", format!("{:.0}%", q * 100.0), value);
    }
    println!("  {:<8} {:>10.4}", "max", summary.max);
    println!();

    println!("Missing percentages by feature group:");
    for group in &report.groups {
        println!(
            "  {:<6} {:>8.2}%  ({} columns)",
            group.prefix, group.missing_percent, group.columns
        );
    }
    println!();

    if let Some(profile) = &report.by_date {
        println!("Average missing features per row over time:");
        println!("  {:>10} {:>20}", "date_id", "avg_missing_per_row");
        let n = profile.averages.len();
        let edges = profile
            .averages
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < DATE_EDGE_ROWS || *i >= n.saturating_sub(DATE_EDGE_ROWS));
        let mut last_index = None;
        for (i, date) in edges {
            if last_index.is_some_and(|prev: usize| i > prev + 1) {
                println!("  ...");
            }
            println!("  {:>10} {:>20.4}", date.date_id, date.avg_missing_per_row);
            last_index = Some(i);
        }
        println!("\nDate range: {} → {}\n", profile.first, profile.last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_saves_summaries_for_each_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.csv");
        let test = dir.path().join("test.csv");
        fs::write(&train, "date_id,M1,E1\n0,,1.0\n1,2.0,\n2,3.0,1.5\n").unwrap();
        fs::write(&test, "date_id,M1\n3,1.0\n").unwrap();
        let out = dir.path().join("outputs");

        missing_report(
            &Settings::default(),
            vec![train, test],
            Some(out.clone()),
            15,
            OutputFormat::Text,
        )
        .unwrap();

        for file in [
            "train_missing_summary.csv",
            "train_missing_per_row.csv",
            "test_missing_summary.csv",
            "test_missing_per_row.csv",
        ] {
            assert!(out.join(file).exists(), "{file} not written");
        }
    }
}
