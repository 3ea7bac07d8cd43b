//! Filter-and-Chart Dashboard
//!
//! One render pass of the interactive dashboard:
//!
//! - **Types**: records, the injected category domain, filter state
//! - **Provider**: where records come from (synthetic or CSV)
//! - **Filter**: inclusive date range plus category match
//! - **Charts**: line, bar, scatter, histogram, pie and area datasets
//! - **Pipeline**: fetch → filter → derive, or an empty-result notice
//!
//! # Pipeline
//!
//! ```text
//! FilterState → Provider::fetch → apply_filter → ChartSet::derive → DashboardView
//!                                      │
//!                                      └─ empty → DashboardView::Empty
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use panorama::dashboard::{CategoryDomain, Dashboard, FilterState, SyntheticProvider};
//! use std::sync::Arc;
//!
//! let domain = CategoryDomain::default();
//! let provider = Arc::new(SyntheticProvider::generate(&domain, start, 100, 42));
//! let dashboard = Dashboard::new(provider, domain, 20);
//!
//! let filter = FilterState::full_range(start, 100);
//! let view = dashboard.render(&filter)?;
//! ```

mod charts;
mod error;
mod filter;
mod pipeline;
mod provider;
mod synthetic;
mod types;

pub use charts::{
    derive_histogram, line_series, mean_profit_by_category, scatter_points, value_counts,
    CategoryMean, CategoryShare, Chart, ChartKind, ChartSet, HistogramBin, ScatterPoint,
    SeriesPoint, PALETTE,
};
pub use error::{DashboardError, DashboardResult};
pub use filter::apply_filter;
pub use pipeline::{Dashboard, DashboardView, EMPTY_NOTICE};
pub use provider::{write_csv, CsvProvider, DataProvider, SyntheticProvider};
pub use synthetic::SeededRng;
pub use types::{
    CategoryDomain, CategoryFilter, DateBounds, FilterState, Record, ALL_CATEGORIES,
};
