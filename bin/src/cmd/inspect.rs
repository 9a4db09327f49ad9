//! Inspect command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tactical_data::{inspect, read_csv};

use super::{dataset_name, dataset_paths, print_banner};
use crate::settings::Settings;

/// Print shape, columns, dtypes and the first rows of each dataset.
pub(crate) fn inspect_datasets(settings: &Settings, paths: Vec<PathBuf>, rows: usize) -> Result<()> {
    print_banner("Dataset Inspection");

    for path in dataset_paths(settings, paths) {
        let dataset = read_csv(&path)?;
        let summary = inspect(&dataset_name(&path), dataset.data(), rows);
        println!("{summary}");
        println!("{}\n", "=".repeat(40));
    }

    Ok(())
}
