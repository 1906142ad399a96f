//! Summary file export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, TimeZone};
use log::info;

use crate::dataset::TokenDataset;
use crate::error::{AnalyticsError, Result};
use crate::format::{rule, usd, usd_thousands};
use crate::stats::MetricSummary;

/// Renders the summary. Apart from the `Generated:` line the output depends
/// only on the dataset.
pub fn write_summary<W, Tz>(
    out: &mut W,
    dataset: &TokenDataset,
    generated_at: &DateTime<Tz>,
) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let buy_ins: Vec<f64> = dataset.iter().map(|r| r.initial_buy_in_usd).collect();
    let market_caps: Vec<f64> = dataset.iter().map(|r| r.initial_market_cap_usd).collect();
    let average_buy_in = MetricSummary::from_values(&buy_ins)
        .map(|s| usd(s.mean))
        .unwrap_or_else(|| "n/a".to_string());
    let average_market_cap = MetricSummary::from_values(&market_caps)
        .map(|s| usd_thousands(s.mean))
        .unwrap_or_else(|| "n/a".to_string());

    writeln!(out, "Token Analytics Summary")?;
    writeln!(out, "{}\n", rule())?;
    writeln!(
        out,
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Micros, false)
    )?;
    writeln!(out, "Total Tokens: {}\n", dataset.len())?;
    writeln!(out, "Average Initial Buy-In: {}", average_buy_in)?;
    writeln!(out, "Average Initial Market Cap: {}", average_market_cap)?;
    Ok(())
}

/// Writes the summary to `path`, replacing any existing file.
///
/// # Errors
///
/// [`AnalyticsError::Export`] if the file cannot be created or written.
pub fn export_summary<Tz>(
    dataset: &TokenDataset,
    path: impl AsRef<Path>,
    generated_at: &DateTime<Tz>,
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let path = path.as_ref();
    let to_export_error = |source: io::Error| AnalyticsError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_export_error)?;
    let mut writer = BufWriter::new(file);
    write_summary(&mut writer, dataset, generated_at).map_err(to_export_error)?;
    writer.flush().map_err(to_export_error)?;

    info!("Summary exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TokenRecord;
    use chrono::Utc;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample() -> TokenDataset {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        TokenDataset::new(vec![
            TokenRecord::new(ts, "Foo", "FOO", 100.0, 1000.0),
            TokenRecord::new(ts, "Bar", "BAR", 500.0, 2000.0),
            TokenRecord::new(ts, "Baz", "BAZ", 50.0, 5000.0),
        ])
    }

    #[test]
    fn summary_has_fixed_layout() {
        let mut out = Vec::new();
        write_summary(&mut out, &sample(), &generated_at()).unwrap();

        let expected = format!(
            "Token Analytics Summary\n{}\n\n\
             Generated: 2024-06-01T12:00:00.000000+00:00\n\
             Total Tokens: 3\n\n\
             Average Initial Buy-In: $216.67\n\
             Average Initial Market Cap: $2,666.67\n",
            "=".repeat(60)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn empty_dataset_has_no_averages() {
        let mut out = Vec::new();
        write_summary(&mut out, &TokenDataset::default(), &generated_at()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total Tokens: 0\n"));
        assert!(text.contains("Average Initial Buy-In: n/a\n"));
        assert!(text.contains("Average Initial Market Cap: n/a\n"));
    }

    #[test]
    fn export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis-summary.txt");
        std::fs::write(&path, "stale contents that are much longer than nothing").unwrap();

        export_summary(&TokenDataset::default(), &path, &generated_at()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Token Analytics Summary\n"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("analysis-summary.txt");

        match export_summary(&sample(), &path, &generated_at()) {
            Err(AnalyticsError::Export { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
