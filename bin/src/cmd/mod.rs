//! CLI subcommand modules.
//!
//! This module contains the implementations for all tactical CLI subcommands.

pub(crate) mod inspect;
pub(crate) mod missing;
pub(crate) mod predict;
pub(crate) mod predictors;
pub(crate) mod score;

use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Explicit paths, or the configured train and test files.
pub(crate) fn dataset_paths(settings: &Settings, paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![settings.data.train_path(), settings.data.test_path()]
    } else {
        paths
    }
}

/// File name used to label a dataset in reports.
pub(crate) fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Print a boxed section title.
pub(crate) fn print_banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a ruled sub-section heading.
pub(crate) fn print_section(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
