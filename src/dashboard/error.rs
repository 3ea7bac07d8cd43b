//! Dashboard error types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while producing a dashboard render pass
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Category is neither the `All` sentinel nor part of the domain
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Date lies outside the range the date widget offers
    #[error("Date {date} is outside the available range {min} to {max}")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    /// Category domain is unusable
    #[error("Invalid category domain: {0}")]
    InvalidDomain(String),

    /// Data provider failed to produce records
    #[error("Provider error: {0}")]
    Provider(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
