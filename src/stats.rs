//! # Basic Statistics
//!
//! Aggregate figures over the two USD columns plus the covered date range.
//! Nothing here is computed for an empty dataset: [`basic_stats`] returns
//! `None` and the printed section says so.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::dataset::TokenDataset;
use crate::format::{usd, usd_thousands};

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    /// Summarizes `values`, or `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        // Sorted copy for the median
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        let min = sorted[0];
        let max = sorted[len - 1];
        let mean = sorted.iter().sum::<f64>() / len as f64;

        let median = if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        };

        // Summation error can push the mean a hair outside [min, max]
        let mean = mean.clamp(min, max);

        Some(Self {
            mean,
            median,
            min,
            max,
        })
    }
}

/// Everything the basic statistics section reports
#[derive(Debug, Clone, PartialEq)]
pub struct BasicStats {
    pub count: usize,
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub buy_in: MetricSummary,
    pub market_cap: MetricSummary,
}

/// Computes [`BasicStats`], `None` for an empty dataset.
pub fn basic_stats(dataset: &TokenDataset) -> Option<BasicStats> {
    let earliest = dataset.iter().map(|r| r.timestamp).min()?;
    let latest = dataset.iter().map(|r| r.timestamp).max()?;

    let buy_ins: Vec<f64> = dataset.iter().map(|r| r.initial_buy_in_usd).collect();
    let market_caps: Vec<f64> = dataset.iter().map(|r| r.initial_market_cap_usd).collect();

    Some(BasicStats {
        count: dataset.len(),
        earliest,
        latest,
        buy_in: MetricSummary::from_values(&buy_ins)?,
        market_cap: MetricSummary::from_values(&market_caps)?,
    })
}

/// Writes the basic statistics section body.
pub fn write_basic_stats<W: Write>(out: &mut W, stats: Option<&BasicStats>) -> io::Result<()> {
    let Some(stats) = stats else {
        writeln!(out, "\nNo token records to summarize.")?;
        return Ok(());
    };

    writeln!(out, "\nTotal Tokens Tracked: {}", stats.count)?;
    writeln!(
        out,
        "Date Range: {} to {}",
        stats.earliest.to_rfc3339(),
        stats.latest.to_rfc3339()
    )?;

    writeln!(out, "\nInitial Buy-In (USD):")?;
    write_metric(out, &stats.buy_in, usd)?;

    writeln!(out, "\nInitial Market Cap (USD):")?;
    write_metric(out, &stats.market_cap, usd_thousands)?;

    Ok(())
}

fn write_metric<W: Write>(
    out: &mut W,
    summary: &MetricSummary,
    fmt: fn(f64) -> String,
) -> io::Result<()> {
    writeln!(out, "  Average: {}", fmt(summary.mean))?;
    writeln!(out, "  Median:  {}", fmt(summary.median))?;
    writeln!(out, "  Min:     {}", fmt(summary.min))?;
    writeln!(out, "  Max:     {}", fmt(summary.max))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TokenRecord;
    use chrono::TimeZone;

    fn record(hour: u32, buy_in: f64, market_cap: f64) -> TokenRecord {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap();
        TokenRecord::new(ts, "T", "T", buy_in, market_cap)
    }

    #[test]
    fn empty_values_have_no_summary() {
        assert_eq!(MetricSummary::from_values(&[]), None);
        assert_eq!(basic_stats(&TokenDataset::default()), None);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let summary = MetricSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.mean, 2.5);
    }

    #[test]
    fn ordering_invariants_hold() {
        let samples: [&[f64]; 4] = [
            &[0.0],
            &[100.0, 500.0, 50.0],
            &[0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1],
            &[1e9, 3.5, 0.0, 42.0, 42.0],
        ];
        for values in samples {
            let s = MetricSummary::from_values(values).unwrap();
            assert!(s.min <= s.median && s.median <= s.max, "{values:?}");
            assert!(s.min <= s.mean && s.mean <= s.max, "{values:?}");
        }
    }

    #[test]
    fn basic_stats_covers_both_columns_and_date_range() {
        let dataset = TokenDataset::new(vec![
            record(10, 100.0, 1000.0),
            record(3, 500.0, 2000.0),
            record(23, 50.0, 5000.0),
        ]);
        let stats = basic_stats(&dataset).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.earliest, Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap());
        assert_eq!(stats.latest, Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap());
        assert!((stats.buy_in.mean - 216.666_666).abs() < 1e-3);
        assert_eq!(stats.buy_in.median, 100.0);
        assert_eq!(stats.market_cap.max, 5000.0);
    }

    #[test]
    fn printed_section_uses_currency_formats() {
        let dataset = TokenDataset::new(vec![record(1, 1500.0, 1_250_000.0)]);
        let stats = basic_stats(&dataset);
        let mut out = Vec::new();
        write_basic_stats(&mut out, stats.as_ref()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total Tokens Tracked: 1"));
        assert!(text.contains("  Average: $1500.00"));
        assert!(text.contains("  Max:     $1,250,000.00"));
    }

    #[test]
    fn empty_dataset_prints_no_data() {
        let mut out = Vec::new();
        write_basic_stats(&mut out, None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nNo token records to summarize.\n");
    }
}
