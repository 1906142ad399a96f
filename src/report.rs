//! # Token Analytics Report Pipeline
//!
//! Runs every stage once, in order, over a single in-memory dataset:
//!
//! 1. Load `token-analytics.csv` from the data directory
//! 2. Basic statistics over buy-in and market cap
//! 3. Top-N listings by each metric
//! 4. Time analysis (annotates hour and day of week)
//! 5. Pattern detection (annotates buy-in ratio)
//! 6. Export `analysis-summary.txt`
//!
//! The report goes to any `io::Write`; the binary passes stdout. A failure in
//! any stage ends the run. Output from stages that already completed stays
//! written, and the summary file is only touched after the analysis succeeds.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze ./data/token-analytics.csv
//! $ cargo run --release
//!
//! # Custom data directory, top 5, first 10 hours only
//! $ cargo run --release -- --data-dir /srv/tokens --top 5 --hour-limit 10
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Local, TimeZone};
use clap::Parser;
use log::{LevelFilter, debug};

use crate::config::{CliArgs, ReportConfig};
use crate::dataset::{TokenDataset, load_dataset};
use crate::error::{AnalyticsError, Result};
use crate::export::export_summary;
use crate::format::rule;
use crate::patterns::{annotate_buy_in_ratios, write_patterns};
use crate::stats::{basic_stats, write_basic_stats};
use crate::time_analysis::{TimeDistribution, annotate_time_features, write_time_analysis};
use crate::top_n::write_top_tokens;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub record_count: usize,
    pub summary_path: PathBuf,
}

/// Runs the full pipeline, stamping the summary with the current local time.
pub fn run_report<W: Write>(config: &ReportConfig, out: &mut W) -> Result<ReportOutcome> {
    run_report_at(config, out, &Local::now())
}

/// Runs the full pipeline with an explicit generation time for the summary.
pub fn run_report_at<W, Tz>(
    config: &ReportConfig,
    out: &mut W,
    generated_at: &DateTime<Tz>,
) -> Result<ReportOutcome>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    writeln!(out, "Token Analytics Analysis")?;
    writeln!(out, "{}", rule())?;

    let mut dataset = load_dataset(config.dataset_path())?;
    writeln!(out, "Loaded {} token records\n", dataset.len())?;

    analyze(&mut dataset, config, out)?;

    let summary_path = config.summary_path();
    export_summary(&dataset, &summary_path, generated_at)?;
    writeln!(out, "\nSummary exported to: {}", summary_path.display())?;

    writeln!(out, "\n{}", rule())?;
    writeln!(out, "Analysis Complete!")?;
    writeln!(out, "{}", rule())?;

    Ok(ReportOutcome {
        record_count: dataset.len(),
        summary_path,
    })
}

/// Stages 2 through 5. Leaves `dataset` annotated with time features and
/// buy-in ratios.
pub fn analyze<W: Write>(dataset: &mut TokenDataset, config: &ReportConfig, out: &mut W) -> io::Result<()> {
    section(out, "BASIC STATISTICS", false)?;
    write_basic_stats(out, basic_stats(dataset).as_ref())?;

    section(out, &format!("TOP {} TOKENS", config.top_n), true)?;
    write_top_tokens(out, dataset, config.top_n)?;

    section(out, "TIME-BASED ANALYSIS", true)?;
    annotate_time_features(dataset);
    write_time_analysis(out, &TimeDistribution::from_dataset(dataset), config.hour_limit)?;

    section(out, "PATTERN DETECTION", true)?;
    annotate_buy_in_ratios(dataset);
    write_patterns(out, dataset, config.ratio_threshold)?;

    debug!("Analysis stages finished for {} records", dataset.len());
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str, leading_blank: bool) -> io::Result<()> {
    if leading_blank {
        writeln!(out)?;
    }
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    // RUST_LOG refines the default, --verbose overrides both
    builder.parse_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    if let Err(e) = builder.try_init() {
        eprintln!("Warning: logging not initialized: {}", e);
    }
}

/// Main entry point for the token analytics reporter.
///
/// Parses arguments, runs the report against stdout and exits with status 1
/// on any failure. A missing dataset is reported with a hint that the
/// collector has not produced data yet.
pub fn token_analytics_main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    let config = ReportConfig::from(&args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run_report(&config, &mut out) {
        if let Err(flush_err) = out.flush() {
            eprintln!("Warning: failed to flush report output: {}", flush_err);
        }
        debug!("Report run failed: {:?}", e);
        eprintln!("{}", e);
        if matches!(e, AnalyticsError::DatasetNotFound { .. }) {
            eprintln!("   Waiting for tokens to be tracked...");
        }
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TokenRecord;
    use chrono::Utc;

    #[test]
    fn analyze_annotates_dataset_and_prints_every_section() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut dataset = TokenDataset::new(vec![
            TokenRecord::new(ts, "Foo", "FOO", 100.0, 1000.0),
            TokenRecord::new(ts, "Zero", "ZERO", 100.0, 0.0),
        ]);
        let mut out = Vec::new();
        analyze(&mut dataset, &ReportConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for title in ["BASIC STATISTICS", "TOP 10 TOKENS", "TIME-BASED ANALYSIS", "PATTERN DETECTION"] {
            assert!(text.contains(title), "missing section {title}");
        }
        assert!(dataset.iter().all(|r| r.time_features.is_some()));
        assert_eq!(dataset.records()[0].buy_in_ratio, Some(0.1));
        assert_eq!(dataset.records()[1].buy_in_ratio, None);
        // 0.1 is not above the 0.10 threshold
        assert!(!text.contains("Found"));
    }

    #[test]
    fn empty_dataset_runs_every_stage() {
        let mut dataset = TokenDataset::default();
        let mut out = Vec::new();
        analyze(&mut dataset, &ReportConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("No token records to summarize."));
        assert!(text.contains("(no tokens)"));
    }
}
