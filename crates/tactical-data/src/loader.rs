//! CSV reading and writing.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tactical_traits::{Dataset, Result};
use tracing::{debug, info};

/// Read a CSV file with a header row, inferring the schema from every row.
///
/// # Errors
///
/// Returns [`tactical_traits::TacticalError::Io`] if the file cannot be
/// opened and [`tactical_traits::TacticalError::Polars`] if it cannot be
/// parsed.
///
/// # Example
///
/// ```rust,ignore
/// let train = tactical_data::read_csv("data/train.csv")?;
/// println!("{:?}", train.shape());
/// ```
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    // Surface a missing file as an I/O error rather than a parser error.
    fs::metadata(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded csv");
    Ok(Dataset::new(df))
}

/// Write `df` as CSV with a header row, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or the frame
/// cannot be serialized.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;

    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}
