//! Site shell error types

use thiserror::Error;

/// Errors raised by the paged shell
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SiteError {
    /// Page name outside the closed page set
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Navigation attempted before logging in
    #[error("Not logged in")]
    NotAuthenticated,
}

/// Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;
