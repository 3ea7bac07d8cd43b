//! Chart datasets
//!
//! Derives the six datasets the dashboard hands to the charting
//! collaborator. Every function here expects a non-empty record set; the
//! pipeline never calls them otherwise.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::dashboard::types::{CategoryDomain, Record};

/// Colour palette, indexed by a category's position in the domain
pub const PALETTE: [&str; 5] = ["#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#F44336"];

/// How the charting collaborator should draw a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Histogram,
    Pie,
    Area,
}

/// A dataset plus the axis and title text to draw it with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart<T> {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: Vec<T>,
}

impl<T> Chart<T> {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, data: Vec<T>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data,
        }
    }
}

/// One point of a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: i64,
}

/// Mean profit of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean: f64,
    /// Number of records averaged
    pub count: usize,
}

/// One (sales, profit) pair, coloured by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub sales: i64,
    pub profit: i64,
    pub category: String,
    pub color: String,
}

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Lower edge (inclusive)
    pub lower: f64,
    /// Upper edge (exclusive, except for the last bin)
    pub upper: f64,
    pub count: usize,
}

/// Record count of one category and its fraction of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub share: f64,
}

/// All datasets of one dashboard render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub line: Chart<SeriesPoint>,
    pub bar: Chart<CategoryMean>,
    pub scatter: Chart<ScatterPoint>,
    pub histogram: Chart<HistogramBin>,
    pub pie: Chart<CategoryShare>,
    pub area: Chart<SeriesPoint>,
}

impl ChartSet {
    /// Derive every dataset from a filtered record set
    pub fn derive(records: &[&Record], domain: &CategoryDomain, bins: usize) -> Self {
        let series = line_series(records);
        let sales: Vec<i64> = records.iter().map(|r| r.sales).collect();

        Self {
            line: Chart::new(ChartKind::Line, "Sales over time", "Date", "Sales", series.clone()),
            bar: Chart::new(
                ChartKind::Bar,
                "Average profit by category",
                "Category",
                "Profit",
                mean_profit_by_category(records),
            ),
            scatter: Chart::new(
                ChartKind::Scatter,
                "Sales vs Profit",
                "Sales",
                "Profit",
                scatter_points(records, domain),
            ),
            histogram: Chart::new(
                ChartKind::Histogram,
                "Sales distribution",
                "Sales",
                "Count",
                derive_histogram(&sales, bins),
            ),
            pie: Chart::new(
                ChartKind::Pie,
                "Category distribution",
                "Category",
                "Count",
                value_counts(records),
            ),
            area: Chart::new(ChartKind::Area, "Sales over time (area)", "Date", "Sales", series),
        }
    }
}

/// Sales over date, sorted by date (stable for equal dates)
pub fn line_series(records: &[&Record]) -> Vec<SeriesPoint> {
    let mut series: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.date,
            value: r.sales,
        })
        .collect();

    series.sort_by_key(|p| p.date);
    series
}

/// Arithmetic mean of profit per category present, categories ascending
pub fn mean_profit_by_category(records: &[&Record]) -> Vec<CategoryMean> {
    // Summed in i128; two i64 profits can already overflow i64
    let mut groups: BTreeMap<&str, (i128, usize)> = BTreeMap::new();

    for record in records {
        let entry = groups.entry(record.category.as_str()).or_insert((0, 0));
        entry.0 += i128::from(record.profit);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(category, (sum, count))| CategoryMean {
            category: category.to_string(),
            mean: sum as f64 / count as f64,
            count,
        })
        .collect()
}

/// (sales, profit) pairs in input order, coloured by domain position
pub fn scatter_points(records: &[&Record], domain: &CategoryDomain) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| {
            let slot = domain.position(&r.category).unwrap_or(0);
            ScatterPoint {
                sales: r.sales,
                profit: r.profit,
                category: r.category.clone(),
                color: PALETTE[slot % PALETTE.len()].to_string(),
            }
        })
        .collect()
}

/// Equal-width histogram over the observed min/max
///
/// The last bin is closed on the right so the maximum is counted. When all
/// values are equal the width is zero and every value lands in the first bin.
///
/// A value is counted in the last bin whose reported `lower` edge it
/// reaches, so counts always agree with the emitted edges.
pub fn derive_histogram(values: &[i64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().min().unwrap_or(0) as f64;
    let max = values.iter().copied().max().unwrap_or(0) as f64;
    let width = (max - min) / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let value = value as f64;
        let slot = if width > 0.0 {
            histogram
                .partition_point(|bin| bin.lower <= value)
                .saturating_sub(1)
        } else {
            0
        };
        histogram[slot].count += 1;
    }

    histogram
}

/// Record counts per category, largest first, ties broken by name
pub fn value_counts(records: &[&Record]) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.category.as_str()).or_default() += 1;
    }

    let total = records.len() as f64;
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            share: count as f64 / total,
        })
        .collect();

    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::provider::SyntheticProvider;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn synthetic() -> Vec<Record> {
        SyntheticProvider::generate(&CategoryDomain::default(), date(2023, 1, 1), 100, 42)
            .records()
            .to_vec()
    }

    #[test]
    fn test_mean_profit_known_values() {
        let records = vec![
            Record::new(date(2023, 1, 1), 100, 10, "B"),
            Record::new(date(2023, 1, 2), 200, 20, "A"),
            Record::new(date(2023, 1, 3), 300, 35, "B"),
            Record::new(date(2023, 1, 4), 400, 40, "A"),
        ];
        let borrowed: Vec<&Record> = records.iter().collect();

        let means = mean_profit_by_category(&borrowed);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].category, "A");
        assert!((means[0].mean - 30.0).abs() < 1e-9);
        assert_eq!(means[1].category, "B");
        assert!((means[1].mean - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_profit_reconstructs_sums() {
        let records = synthetic();
        let borrowed: Vec<&Record> = records.iter().collect();

        let means = mean_profit_by_category(&borrowed);
        let present: HashSet<&str> = records.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(means.len(), present.len());

        for row in &means {
            let profits: Vec<i64> = records
                .iter()
                .filter(|r| r.category == row.category)
                .map(|r| r.profit)
                .collect();
            let sum: i64 = profits.iter().sum();

            assert_eq!(row.count, profits.len());
            assert!((row.mean * row.count as f64 - sum as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn test_line_series_sorted() {
        let records = vec![
            Record::new(date(2023, 1, 3), 300, 30, "A"),
            Record::new(date(2023, 1, 1), 100, 10, "A"),
            Record::new(date(2023, 1, 2), 200, 20, "B"),
        ];
        let borrowed: Vec<&Record> = records.iter().collect();

        let series = line_series(&borrowed);
        let values: Vec<i64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100, 200, 300]);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let records = synthetic();
        let sales: Vec<i64> = records.iter().map(|r| r.sales).collect();

        let histogram = derive_histogram(&sales, 20);
        assert_eq!(histogram.len(), 20);
        assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), 100);

        let min = *sales.iter().min().unwrap() as f64;
        let max = *sales.iter().max().unwrap() as f64;
        assert_eq!(histogram[0].lower, min);
        assert_eq!(histogram[19].upper, max);
    }

    #[test]
    fn test_histogram_edges() {
        let histogram = derive_histogram(&[0, 5, 10], 2);
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram[0].count, 1);
        // 5 is the shared edge and 10 the closed right end
        assert_eq!(histogram[1].count, 2);
    }

    #[test]
    fn test_histogram_value_on_inexact_edge() {
        // 44 / 20 = 2.2 is inexact: 33 / 2.2 falls just short of 15.0
        // while the reported lower edge of bin 15 is exactly 33.0
        let histogram = derive_histogram(&[0, 33, 44], 20);
        assert_eq!(histogram[15].lower, 33.0);
        assert_eq!(histogram[15].count, 1);
        assert_eq!(histogram[14].count, 0);
    }

    #[test]
    fn test_histogram_counts_agree_with_edges() {
        for bins in [7usize, 13, 20] {
            for min in [0i64, 3, 17, 49] {
                for span in [1i64, 9, 44, 101, 399] {
                    let values: Vec<i64> = (min..=min + span).collect();
                    let histogram = derive_histogram(&values, bins);
                    assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), values.len());

                    let counted: Vec<usize> = histogram
                        .iter()
                        .enumerate()
                        .map(|(i, bin)| {
                            values
                                .iter()
                                .filter(|&&value| {
                                    let v = value as f64;
                                    bin.lower <= v
                                        && (v < bin.upper || (i == bins - 1 && v <= bin.upper))
                                })
                                .count()
                        })
                        .collect();
                    let reported: Vec<usize> = histogram.iter().map(|b| b.count).collect();
                    assert_eq!(counted, reported, "bins={} min={} span={}", bins, min, span);
                }
            }
        }
    }

    #[test]
    fn test_mean_profit_does_not_overflow() {
        let data = "date,sales,profit,category\n\
                    2023-01-01,100,9223372036854775807,A\n\
                    2023-01-02,100,9223372036854775807,A\n";
        let provider = crate::dashboard::provider::CsvProvider::from_reader(
            data.as_bytes(),
            &CategoryDomain::default(),
        )
        .unwrap();
        let borrowed: Vec<&Record> = provider.records().iter().collect();

        let means = mean_profit_by_category(&borrowed);
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].count, 2);
        assert_eq!(means[0].mean, i64::MAX as f64);
    }

    #[test]
    fn test_histogram_single_value() {
        let histogram = derive_histogram(&[500, 500, 500], 20);
        assert_eq!(histogram.len(), 20);
        assert_eq!(histogram[0].count, 3);
        assert!(histogram[1..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_histogram_empty_input() {
        assert!(derive_histogram(&[], 20).is_empty());
        assert!(derive_histogram(&[1, 2], 0).is_empty());
    }

    #[test]
    fn test_value_counts_order_and_shares() {
        let records = vec![
            Record::new(date(2023, 1, 1), 100, 10, "C"),
            Record::new(date(2023, 1, 2), 100, 10, "A"),
            Record::new(date(2023, 1, 3), 100, 10, "C"),
            Record::new(date(2023, 1, 4), 100, 10, "B"),
        ];
        let borrowed: Vec<&Record> = records.iter().collect();

        let counts = value_counts(&borrowed);
        let order: Vec<&str> = counts.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert!((counts[0].share - 0.5).abs() < 1e-9);

        let total: f64 = counts.iter().map(|c| c.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scatter_colours_follow_domain() {
        let domain = CategoryDomain::default();
        let records = vec![
            Record::new(date(2023, 1, 1), 100, 10, "A"),
            Record::new(date(2023, 1, 2), 200, 20, "D"),
        ];
        let borrowed: Vec<&Record> = records.iter().collect();

        let points = scatter_points(&borrowed, &domain);
        assert_eq!(points[0].color, PALETTE[0]);
        assert_eq!(points[1].color, PALETTE[3]);
        assert_eq!((points[1].sales, points[1].profit), (200, 20));
    }

    #[test]
    fn test_chart_set_area_mirrors_line() {
        let records = synthetic();
        let borrowed: Vec<&Record> = records.iter().collect();

        let charts = ChartSet::derive(&borrowed, &CategoryDomain::default(), 20);
        assert_eq!(charts.line.data, charts.area.data);
        assert_eq!(charts.area.kind, ChartKind::Area);
        assert_eq!(charts.scatter.data.len(), 100);
        assert_eq!(charts.histogram.data.len(), 20);
    }
}
