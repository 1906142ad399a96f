//! # Token Analytics Reporter
//!
//! Descriptive statistics over a CSV of token launch records: buy-in and
//! market cap aggregates, top-N rankings, launch timing, buy-in concentration
//! and ticker shapes. The printed report goes to any writer and a short
//! summary is written next to the input file.
//!
//! ```no_run
//! use token_analytics_reporter::{ReportConfig, run_report};
//!
//! let config = ReportConfig::with_data_dir("data");
//! let outcome = run_report(&config, &mut std::io::stdout()).expect("report failed");
//! println!("{} records", outcome.record_count);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod format;
pub mod patterns;
pub mod report;
pub mod stats;
pub mod time_analysis;
pub mod top_n;

pub use config::ReportConfig;
pub use dataset::{TimeFeatures, TokenDataset, TokenRecord, load_dataset, load_dataset_from_reader};
pub use error::{AnalyticsError, Result};
pub use report::{ReportOutcome, analyze, run_report, run_report_at, token_analytics_main};
