//! Token Analytics Reporter - Main Application
//!
//! Entry point for the token launch analytics report.
//!
//! # Usage
//!
//! ```bash
//! # Analyze data/token-analytics.csv and write data/analysis-summary.txt
//! $ cargo run --release
//!
//! # With a custom data directory
//! $ cargo run --release -- --data-dir path/to/data
//! ```

use token_analytics_reporter::token_analytics_main;

/// call from library
fn main() {
    token_analytics_main();
}
