//! Dataset locations and identifier aliases.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tactical_traits::{Dataset, Result, TacticalError};
use tracing::debug;

/// Environment variable overriding [`DataConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "TACTICAL_DATA_DIR";

/// Environment variable overriding [`DataConfig::output_dir`].
pub const OUTPUT_DIR_ENV: &str = "TACTICAL_OUTPUT_DIR";

/// Where datasets live and where reports and submissions are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the input CSV files
    pub data_dir: PathBuf,
    /// Directory for diagnostic reports
    pub output_dir: PathBuf,
    /// Directory for generated submission files
    pub submission_dir: PathBuf,
    /// Training file name inside `data_dir`
    pub train_file: String,
    /// Test file name inside `data_dir`
    pub test_file: String,
    /// Accepted identifier column names, in priority order
    pub id_aliases: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("outputs"),
            submission_dir: PathBuf::from("submissions"),
            train_file: "train.csv".to_string(),
            test_file: "test.csv".to_string(),
            id_aliases: ["row_id", "id", "index", "date_id", "rowid"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl DataConfig {
    /// Default configuration with environment overrides applied.
    ///
    /// Also loads a `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_env();
        config
    }

    /// Apply `TACTICAL_DATA_DIR` and `TACTICAL_OUTPUT_DIR`, after loading a
    /// `.env` file if present.
    pub fn merge_env(&mut self) {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        self.merge_vars(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            debug!(data_dir = %dir, "data directory overridden from environment");
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
            debug!(output_dir = %dir, "output directory overridden from environment");
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Full path of the training file.
    #[must_use]
    pub fn train_path(&self) -> PathBuf {
        self.data_dir.join(&self.train_file)
    }

    /// Full path of the test file.
    #[must_use]
    pub fn test_path(&self) -> PathBuf {
        self.data_dir.join(&self.test_file)
    }

    /// Pick the identifier column of `dataset`.
    ///
    /// The first column, in dataset order, whose name is one of the aliases
    /// wins. Without a match the first column is used.
    ///
    /// # Errors
    ///
    /// [`TacticalError::InvalidData`] for a dataset without columns.
    pub fn resolve_id_column(&self, dataset: &Dataset) -> Result<String> {
        let columns = dataset.columns();
        let resolved = columns
            .iter()
            .find(|column| self.id_aliases.iter().any(|alias| alias == *column))
            .or_else(|| columns.first())
            .cloned()
            .ok_or_else(|| TacticalError::InvalidData("dataset has no columns".to_string()))?;

        debug!(id_column = %resolved, "resolved identifier column");
        Ok(resolved)
    }
}
