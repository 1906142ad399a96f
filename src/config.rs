//! Run configuration: where the data lives and how the report is shaped.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Input CSV name inside the data directory
pub const DATASET_FILE_NAME: &str = "token-analytics.csv";
/// Summary file name inside the data directory
pub const SUMMARY_FILE_NAME: &str = "analysis-summary.txt";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_RATIO_THRESHOLD: f64 = 0.10;

/// Explicit settings for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Directory holding the input CSV and receiving the summary
    pub data_dir: PathBuf,
    /// Rows listed per top-N table
    pub top_n: usize,
    /// Buy-in ratio a token must exceed to be flagged
    pub ratio_threshold: f64,
    /// Maximum number of distinct hours printed, `None` prints all
    pub hour_limit: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            top_n: DEFAULT_TOP_N,
            ratio_threshold: DEFAULT_RATIO_THRESHOLD,
            hour_limit: None,
        }
    }
}

impl ReportConfig {
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(DATASET_FILE_NAME)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE_NAME)
    }
}

/// Command line arguments. Every flag is optional; a bare invocation runs the
/// full report against `./data`.
#[derive(Parser, Debug)]
#[command(name = "token_analytics_reporter", version, about = "Analyze collected token launch records")]
pub struct CliArgs {
    /// Directory containing token-analytics.csv
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Number of rows in each top-N table
    #[arg(long = "top", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Flag tokens whose buy-in / market cap ratio exceeds this value
    #[arg(long, default_value_t = DEFAULT_RATIO_THRESHOLD)]
    pub ratio_threshold: f64,

    /// Only print the first N distinct hours of the hourly distribution
    #[arg(long)]
    pub hour_limit: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&CliArgs> for ReportConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            top_n: args.top_n,
            ratio_threshold: args.ratio_threshold,
            hour_limit: args.hour_limit,
        }
    }
}
