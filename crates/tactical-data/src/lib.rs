#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Example
//!
//! ```rust,ignore
//! use tactical_data::{DataConfig, MissingConfig, MissingReport, inspect, read_csv};
//!
//! let config = DataConfig::from_env();
//! let train = read_csv(config.train_path())?;
//!
//! println!("{}", inspect("train.csv", train.data(), 5));
//!
//! let report = MissingReport::compute("train.csv", train.data(), &MissingConfig::default())?;
//! report.save(&config.output_dir)?;
//! ```

pub mod config;
pub mod inspect;
pub mod loader;
pub mod missing;

pub use config::DataConfig;
pub use inspect::{ColumnInfo, DatasetSummary, inspect};
pub use loader::{read_csv, write_csv};
pub use missing::{
    ColumnMissing, DateMissing, DateProfile, GroupMissing, MissingConfig, MissingReport,
};
