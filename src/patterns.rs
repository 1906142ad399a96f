//! Pattern detection: buy-in concentration and ticker shapes.

use std::collections::BTreeMap;
use std::io::{self, Write};

use comfy_table::{Cell, CellAlignment, ContentArrangement, Row, Table, presets::ASCII_MARKDOWN};
use log::debug;

use crate::dataset::{COLUMN_BUY_IN_USD, TokenDataset, TokenRecord};
use crate::format::{percent, thousands};

/// Rows shown from the high-ratio listing
pub const HIGH_RATIO_DISPLAY_LIMIT: usize = 5;

/// `buy_in / market_cap`, undefined for a zero market cap.
pub fn buy_in_ratio(record: &TokenRecord) -> Option<f64> {
    if record.initial_market_cap_usd == 0.0 {
        None
    } else {
        Some(record.initial_buy_in_usd / record.initial_market_cap_usd)
    }
}

/// Sets [`TokenRecord::buy_in_ratio`] wherever it is defined.
pub fn annotate_buy_in_ratios(dataset: &mut TokenDataset) {
    let mut undefined = 0usize;
    for record in dataset.records_mut() {
        record.buy_in_ratio = buy_in_ratio(record);
        if record.buy_in_ratio.is_none() {
            undefined += 1;
        }
    }
    if undefined > 0 {
        debug!("Skipped buy-in ratio for {} records with zero market cap", undefined);
    }
}

/// Records whose ratio is strictly above `threshold`, highest ratio first.
///
/// Records without a ratio (zero market cap, or not yet annotated) are
/// excluded. Ties keep file row order.
pub fn high_ratio_tokens(dataset: &TokenDataset, threshold: f64) -> Vec<&TokenRecord> {
    let mut flagged: Vec<(&TokenRecord, f64)> = dataset
        .iter()
        .filter_map(|record| record.buy_in_ratio.map(|ratio| (record, ratio)))
        .filter(|&(_, ratio)| ratio > threshold)
        .collect();
    flagged.sort_by(|a, b| b.1.total_cmp(&a.1));
    flagged.into_iter().map(|(record, _)| record).collect()
}

/// Number of tokens per ticker length (in characters), ascending by length.
pub fn ticker_length_distribution(dataset: &TokenDataset) -> BTreeMap<usize, usize> {
    let mut lengths = BTreeMap::new();
    for record in dataset.iter() {
        *lengths.entry(record.ticker.chars().count()).or_insert(0) += 1;
    }
    lengths
}

/// Writes the pattern detection section body.
pub fn write_patterns<W: Write>(
    out: &mut W,
    dataset: &TokenDataset,
    ratio_threshold: f64,
) -> io::Result<()> {
    let flagged = high_ratio_tokens(dataset, ratio_threshold);
    if !flagged.is_empty() {
        writeln!(
            out,
            "\nTokens with High Initial Buy-In Ratio (>{}%):",
            percent(ratio_threshold)
        )?;
        writeln!(out, "   Found {} tokens", flagged.len())?;
        let shown = &flagged[..flagged.len().min(HIGH_RATIO_DISPLAY_LIMIT)];
        writeln!(out, "{}", ratio_table(shown))?;
    }

    writeln!(out, "\nMost Common Ticker Patterns:")?;
    writeln!(out, "   Ticker Length Distribution:")?;
    for (length, count) in ticker_length_distribution(dataset) {
        writeln!(out, "     {} chars: {} tokens", length, count)?;
    }
    Ok(())
}

fn ratio_table(records: &[&TokenRecord]) -> Table {
    let mut t = Table::new();
    t.load_preset(ASCII_MARKDOWN);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t.set_header(vec!["Name", "Ticker", "BuyInRatio", COLUMN_BUY_IN_USD]);
    for record in records {
        let ratio = record
            .buy_in_ratio
            .map(|r| format!("{:.6}", r))
            .unwrap_or_else(|| "-".to_string());
        let mut row = Row::new();
        row.add_cell(Cell::new(&record.name).set_alignment(CellAlignment::Left));
        row.add_cell(Cell::new(&record.ticker).set_alignment(CellAlignment::Left));
        row.add_cell(Cell::new(ratio).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(thousands(record.initial_buy_in_usd)).set_alignment(CellAlignment::Right));
        t.add_row(row);
    }
    t
}
