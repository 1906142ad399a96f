//! # Time Analysis
//!
//! Derives hour-of-day and day-of-week (both UTC) for every record and counts
//! launches along each. Days are always reported Monday first, independent of
//! locale or of the order records appear in the file.

use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::{Datelike, Timelike, Weekday};
use log::debug;

use crate::dataset::{TimeFeatures, TokenDataset, TokenRecord};

/// Canonical reporting order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn time_features(record: &TokenRecord) -> TimeFeatures {
    TimeFeatures {
        hour: record.timestamp.hour(),
        day_of_week: record.timestamp.weekday(),
    }
}

/// Sets [`TokenRecord::time_features`] on every record.
pub fn annotate_time_features(dataset: &mut TokenDataset) {
    for record in dataset.records_mut() {
        record.time_features = Some(time_features(record));
    }
    debug!("Derived hour and day of week for {} records", dataset.len());
}

/// Launch counts per weekday and per hour
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeDistribution {
    /// Indexed by `Weekday::num_days_from_monday`
    by_day: [usize; 7],
    by_hour: BTreeMap<u32, usize>,
}

impl TimeDistribution {
    /// Counts records, deriving features for any record not yet annotated.
    pub fn from_dataset(dataset: &TokenDataset) -> Self {
        let mut distribution = Self::default();
        for record in dataset.iter() {
            let features = record.time_features.unwrap_or_else(|| time_features(record));
            distribution.by_day[features.day_of_week.num_days_from_monday() as usize] += 1;
            *distribution.by_hour.entry(features.hour).or_insert(0) += 1;
        }
        distribution
    }

    /// Days with at least one launch, Monday first
    pub fn by_day(&self) -> Vec<(Weekday, usize)> {
        WEEK.iter()
            .map(|&day| (day, self.by_day[day.num_days_from_monday() as usize]))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// Hours with at least one launch, ascending
    pub fn by_hour(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.by_hour.iter().map(|(&hour, &count)| (hour, count))
    }
}

#[cfg(test)]
impl TimeDistribution {
    fn count_for(&self, day: Weekday) -> usize {
        self.by_day[day.num_days_from_monday() as usize]
    }

    fn total(&self) -> usize {
        self.by_day.iter().sum()
    }
}

/// Writes the time analysis section body. `hour_limit` caps how many distinct
/// hours are listed.
pub fn write_time_analysis<W: Write>(
    out: &mut W,
    distribution: &TimeDistribution,
    hour_limit: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "\nTokens by Day of Week:")?;
    for (day, count) in distribution.by_day() {
        writeln!(out, "  {}: {} tokens", day_name(day), count)?;
    }

    writeln!(out, "\nTokens by Hour (UTC):")?;
    let limit = hour_limit.unwrap_or(usize::MAX);
    for (hour, count) in distribution.by_hour().take(limit) {
        writeln!(out, "  {:02}:00 - {} tokens", hour, count)?;
    }
    Ok(())
}
