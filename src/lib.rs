//! # Panorama
//!
//! Three small reactive apps, each expressed as a pure render pass that
//! turns submitted widget values into render instructions for a host UI.
//!
//! ## Modules
//!
//! - [`dashboard`]: filter records by category and date, derive chart datasets
//! - [`site`]: login-gated multi-page shell with a context-passed session
//! - [`registration`]: registration form validation and echo
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use panorama::dashboard::{Dashboard, DashboardView, SyntheticProvider};
//! use panorama::Config;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let domain = config.dashboard.domain()?;
//!
//!     let provider = SyntheticProvider::generate(
//!         &domain,
//!         config.dashboard.start_date,
//!         config.dashboard.record_count,
//!         config.dashboard.seed,
//!     );
//!     let dashboard = Dashboard::new(Arc::new(provider), domain, config.dashboard.histogram_bins);
//!
//!     match dashboard.render(&config.dashboard.default_filter())? {
//!         DashboardView::Charts { record_count, .. } => println!("{} records charted", record_count),
//!         DashboardView::Empty { notice } => println!("{}", notice),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod registration;
pub mod site;

// Re-export top-level types for convenience
pub use dashboard::{
    CategoryDomain, CategoryFilter, ChartSet, Dashboard, DashboardError, DashboardResult,
    DashboardView, DataProvider, FilterState, Record,
};

pub use site::{
    CredentialVerifier, LoginOutcome, Page, SessionState, Site, SiteError, SiteView,
    StaticCredentials,
};

pub use registration::{
    submit, Echo, FieldError, RegistrationError, RegistrationForm, SubmissionOutcome,
};

pub use config::{
    Config, ConfigError, ConfigSource, DashboardConfig, LoggingConfig, RegistrationConfig,
    SiteConfig,
};
