//! Record filtering
//!
//! Filtering borrows from the provider's records, so every kept record is
//! the very same value the provider produced.

use crate::dashboard::types::{FilterState, Record};

/// Keep records inside the date range and matching the category, in input order
pub fn apply_filter<'a>(records: &'a [Record], filter: &FilterState) -> Vec<&'a Record> {
    if filter.start_date > filter.end_date {
        return Vec::new();
    }

    records.iter().filter(|record| filter.matches(record)).collect()
}
