//! Configuration file for the CLI.
//!
//! Every table is optional; missing keys take their defaults.
//!
//! ```toml
//! [data]
//! data_dir = "data"
//! id_aliases = ["date_id"]
//!
//! [score]
//! volatility_tolerance = 1.2
//!
//! [missing]
//! prefixes = ["M", "E", "V"]
//!
//! [predictors.lagged_momentum]
//! overweight = 1.2
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tactical_data::{DataConfig, MissingConfig};
use tactical_eval::ScoreConfig;
use tactical_signals::PredictorSettings;
use tracing::debug;

/// All CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) data: DataConfig,
    pub(crate) score: ScoreConfig,
    pub(crate) missing: MissingConfig,
    pub(crate) predictors: PredictorSettings,
}

impl Settings {
    /// Read `path` if given, then apply environment overrides.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.data.merge_env();
        debug!(?settings, "loaded settings");
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
