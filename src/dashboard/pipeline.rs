//! Dashboard render pass
//!
//! Executes one interaction of the dashboard:
//! 1. Fetch records from the provider
//! 2. Apply the filter
//! 3. Derive chart datasets, or report the empty result

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::charts::ChartSet;
use crate::dashboard::error::DashboardResult;
use crate::dashboard::filter::apply_filter;
use crate::dashboard::provider::DataProvider;
use crate::dashboard::types::{CategoryDomain, FilterState, Record};

/// Warning shown instead of charts when nothing survives the filter
pub const EMPTY_NOTICE: &str = "No data matches your selection. Please change the filters.";

/// Render instructions for one dashboard pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    /// Nothing matched; the notice is the only output
    Empty { notice: String },
    /// Datasets for every chart
    Charts {
        record_count: usize,
        charts: ChartSet,
    },
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        matches!(self, DashboardView::Empty { .. })
    }
}

/// The dashboard: a provider, the category domain and the histogram size
pub struct Dashboard {
    provider: Arc<dyn DataProvider>,
    domain: CategoryDomain,
    histogram_bins: usize,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn DataProvider>, domain: CategoryDomain, histogram_bins: usize) -> Self {
        Self {
            provider,
            domain,
            histogram_bins,
        }
    }

    pub fn domain(&self) -> &CategoryDomain {
        &self.domain
    }

    /// Run one render pass
    pub fn render(&self, filter: &FilterState) -> DashboardResult<DashboardView> {
        let start = Instant::now();
        let records = self.provider.fetch(filter)?;
        let filtered = apply_filter(&records, filter);

        tracing::debug!(
            provider = self.provider.name(),
            category = %filter.category,
            start_date = %filter.start_date,
            end_date = %filter.end_date,
            fetched = records.len(),
            kept = filtered.len(),
            "Filter applied"
        );

        if filtered.is_empty() {
            tracing::warn!("Filter left no records, suppressing charts");
            return Ok(DashboardView::Empty {
                notice: EMPTY_NOTICE.to_string(),
            });
        }

        let charts = ChartSet::derive(&filtered, &self.domain, self.histogram_bins);

        tracing::info!(
            "Dashboard rendered {} records in {}us",
            filtered.len(),
            start.elapsed().as_micros()
        );

        Ok(DashboardView::Charts {
            record_count: filtered.len(),
            charts,
        })
    }

    /// Filtered records, owned, for export
    pub fn filtered_records(&self, filter: &FilterState) -> DashboardResult<Vec<Record>> {
        let records = self.provider.fetch(filter)?;
        Ok(apply_filter(&records, filter).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::error::DashboardError;
    use crate::dashboard::provider::SyntheticProvider;
    use crate::dashboard::types::CategoryFilter;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_dashboard() -> Dashboard {
        let domain = CategoryDomain::default();
        let provider = SyntheticProvider::generate(&domain, date(2023, 1, 1), 100, 42);
        Dashboard::new(Arc::new(provider), domain, 20)
    }

    struct FailingProvider;

    impl DataProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self, _filter: &FilterState) -> DashboardResult<Vec<Record>> {
            Err(DashboardError::Provider("source offline".to_string()))
        }
    }

    #[test]
    fn test_full_range_renders_charts() {
        let dashboard = create_test_dashboard();
        let filter = FilterState::full_range(date(2023, 1, 1), 100);

        match dashboard.render(&filter).unwrap() {
            DashboardView::Charts {
                record_count,
                charts,
            } => {
                assert_eq!(record_count, 100);
                assert_eq!(charts.line.data.len(), 100);
                assert!(charts.bar.data.len() <= 4);
            }
            DashboardView::Empty { .. } => panic!("expected charts"),
        }
    }

    #[test]
    fn test_empty_result_suppresses_charts() {
        let dashboard = create_test_dashboard();
        let filter = FilterState::new(CategoryFilter::All, date(2023, 3, 1), date(2023, 2, 1));

        let view = dashboard.render(&filter).unwrap();
        assert_eq!(
            view,
            DashboardView::Empty {
                notice: EMPTY_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn test_category_filter_limits_bar_rows() {
        let dashboard = create_test_dashboard();
        let filter = FilterState::full_range(date(2023, 1, 1), 100)
            .category(CategoryFilter::Only("A".to_string()));

        if let DashboardView::Charts { charts, .. } = dashboard.render(&filter).unwrap() {
            assert_eq!(charts.bar.data.len(), 1);
            assert_eq!(charts.bar.data[0].category, "A");
            assert_eq!(charts.pie.data.len(), 1);
            assert!((charts.pie.data[0].share - 1.0).abs() < 1e-9);
        } else {
            panic!("category A should have records in 100 days");
        }
    }

    #[test]
    fn test_provider_error_propagates() {
        let dashboard = Dashboard::new(Arc::new(FailingProvider), CategoryDomain::default(), 20);
        let filter = FilterState::full_range(date(2023, 1, 1), 10);

        assert!(matches!(
            dashboard.render(&filter),
            Err(DashboardError::Provider(_))
        ));
    }

    #[test]
    fn test_filtered_records_match_render() {
        let dashboard = create_test_dashboard();
        let filter = FilterState::new(CategoryFilter::All, date(2023, 1, 10), date(2023, 1, 19));

        let records = dashboard.filtered_records(&filter).unwrap();
        assert_eq!(records.len(), 10);
    }

    #[test]
    fn test_view_serializes_with_tag() {
        let view = DashboardView::Empty {
            notice: EMPTY_NOTICE.to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "empty");
    }
}
