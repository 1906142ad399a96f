//! Top-N selection by a USD metric.

use std::io::{self, Write};

use comfy_table::{Cell, CellAlignment, ContentArrangement, Row, Table, presets::ASCII_MARKDOWN};

use crate::dataset::{COLUMN_BUY_IN_USD, COLUMN_MARKET_CAP_USD, TokenDataset, TokenRecord};
use crate::format::thousands;

/// Numeric column a ranking is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    InitialBuyIn,
    InitialMarketCap,
}

impl Metric {
    pub fn value(self, record: &TokenRecord) -> f64 {
        match self {
            Metric::InitialBuyIn => record.initial_buy_in_usd,
            Metric::InitialMarketCap => record.initial_market_cap_usd,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Metric::InitialBuyIn => COLUMN_BUY_IN_USD,
            Metric::InitialMarketCap => COLUMN_MARKET_CAP_USD,
        }
    }

    /// The metric shown alongside this one in a listing
    pub fn other(self) -> Metric {
        match self {
            Metric::InitialBuyIn => Metric::InitialMarketCap,
            Metric::InitialMarketCap => Metric::InitialBuyIn,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Metric::InitialBuyIn => "Highest Initial Buy-In",
            Metric::InitialMarketCap => "Highest Initial Market Cap",
        }
    }
}

/// Returns the `n` records with the largest `metric`, largest first.
///
/// Ties keep file row order, so the result is reproducible.
pub fn top_n_by(dataset: &TokenDataset, metric: Metric, n: usize) -> Vec<&TokenRecord> {
    let mut ranked: Vec<&TokenRecord> = dataset.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    ranked.truncate(n);
    ranked
}

/// Writes both top-N listings.
pub fn write_top_tokens<W: Write>(out: &mut W, dataset: &TokenDataset, n: usize) -> io::Result<()> {
    for metric in [Metric::InitialBuyIn, Metric::InitialMarketCap] {
        writeln!(out, "\n{}:", metric.title())?;
        let top = top_n_by(dataset, metric, n);
        if top.is_empty() {
            writeln!(out, "  (no tokens)")?;
            continue;
        }
        writeln!(out, "{}", ranking_table(&top, metric))?;
    }
    Ok(())
}

fn ranking_table(records: &[&TokenRecord], metric: Metric) -> Table {
    let mut t = Table::new();
    t.load_preset(ASCII_MARKDOWN);
    t.set_content_arrangement(ContentArrangement::Dynamic);
    t.set_header(vec!["Name", "Ticker", metric.column(), metric.other().column()]);
    for record in records {
        let mut row = Row::new();
        row.add_cell(Cell::new(&record.name).set_alignment(CellAlignment::Left));
        row.add_cell(Cell::new(&record.ticker).set_alignment(CellAlignment::Left));
        row.add_cell(Cell::new(thousands(metric.value(record))).set_alignment(CellAlignment::Right));
        row.add_cell(
            Cell::new(thousands(metric.other().value(record))).set_alignment(CellAlignment::Right),
        );
        t.add_row(row);
    }
    t
}
