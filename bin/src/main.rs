//! Tactical CLI binary.
//!
//! Scores market-timing submissions, builds baseline submissions and
//! inspects the competition datasets.

mod cmd;
mod settings;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "tactical")]
#[command(about = "Adjusted-Sharpe scoring for market-timing forecasts", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details of every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Machine-readable JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more submissions against a solution
    Score {
        /// Solution CSV with forward_returns and risk_free_rate
        #[arg(long)]
        solution: PathBuf,

        /// Submission CSV(s) with an identifier and a prediction column
        #[arg(long, num_args = 1.., required = true)]
        submission: Vec<PathBuf>,

        /// Identifier column used for the join (default: first alias found)
        #[arg(long)]
        id: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Build a submission with a baseline predictor
    Predict {
        /// Training CSV (default: from configuration)
        #[arg(long)]
        train: Option<PathBuf>,

        /// Test CSV (default: from configuration)
        #[arg(long)]
        test: Option<PathBuf>,

        /// Predictor name
        #[arg(short, long, default_value = "lagged_momentum")]
        predictor: String,

        /// Weight for the constant predictor
        #[arg(short, long)]
        weight: Option<f64>,

        /// Identifier column of the test set (default: first alias found)
        #[arg(long)]
        id: Option<String>,

        /// Output CSV (default: <submission_dir>/rule_pred.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show shape, columns, dtypes and first rows of datasets
    Inspect {
        /// CSV files (default: train and test from configuration)
        paths: Vec<PathBuf>,

        /// Number of rows to show
        #[arg(short, long, default_value = "5")]
        rows: usize,
    },

    /// Diagnose missing values without modifying the data
    Missing {
        /// CSV files (default: train and test from configuration)
        paths: Vec<PathBuf>,

        /// Directory for the summary CSVs (default: from configuration)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Number of columns listed in the per-column table
        #[arg(long, default_value = "15")]
        top: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List available predictors
    Predictors,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            solution,
            submission,
            id,
            format,
        } => {
            cmd::score::score_submissions(&settings, &solution, &submission, id, format)?;
        }
        Commands::Predict {
            train,
            test,
            predictor,
            weight,
            id,
            out,
        } => {
            cmd::predict::run_predict(&settings, train, test, &predictor, weight, id, out)?;
        }
        Commands::Inspect { paths, rows } => {
            cmd::inspect::inspect_datasets(&settings, paths, rows)?;
        }
        Commands::Missing {
            paths,
            out_dir,
            top,
            format,
        } => {
            cmd::missing::missing_report(&settings, paths, out_dir, top, format)?;
        }
        Commands::Predictors => {
            cmd::predictors::list_predictors();
        }
    }

    Ok(())
}

/// Log to stderr so JSON on stdout stays parseable.
fn init_tracing(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// A non-empty `RUST_LOG` is used as given; otherwise `tactical=info`, or
/// `tactical=debug` with `-v`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    let directives = match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ if verbose => "tactical=debug",
        _ => "tactical=info",
    };
    Ok(EnvFilter::try_new(directives)?)
}
