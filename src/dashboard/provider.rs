//! Data Providers
//!
//! A provider hands the pipeline the record set for a render pass. The
//! pipeline always re-applies the filter itself, so a provider may return
//! more records than the filter keeps but never records it made up later.
//!
//! - `SyntheticProvider`: seeded generator, one record per day
//! - `CsvProvider`: records loaded from a `date,sales,profit,category` file

use chrono::{Duration, NaiveDate};
use std::io::{Read, Write};
use std::path::Path;

use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::dashboard::synthetic::SeededRng;
use crate::dashboard::types::{CategoryDomain, FilterState, Record};

/// Source of dashboard records
pub trait DataProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Records relevant to this filter
    fn fetch(&self, filter: &FilterState) -> DashboardResult<Vec<Record>>;
}

/// Sales bounds of generated records, `[low, high)`
const SALES_RANGE: (i64, i64) = (100, 1000);
/// Profit bounds of generated records, `[low, high)`
const PROFIT_RANGE: (i64, i64) = (10, 100);

/// Deterministic synthetic records, generated once
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    records: Vec<Record>,
}

impl SyntheticProvider {
    /// Generate `count` daily records starting at `start`
    pub fn generate(domain: &CategoryDomain, start: NaiveDate, count: usize, seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let categories = domain.categories();

        let records = (0..count)
            .map(|day| {
                let date = start + Duration::days(day as i64);
                let sales = rng.range(SALES_RANGE.0, SALES_RANGE.1);
                let profit = rng.range(PROFIT_RANGE.0, PROFIT_RANGE.1);
                let category = categories[rng.index(categories.len())].clone();
                Record::new(date, sales, profit, category)
            })
            .collect();

        tracing::debug!(count, seed, %start, "Generated synthetic records");

        Self { records }
    }

    /// All generated records
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, _filter: &FilterState) -> DashboardResult<Vec<Record>> {
        Ok(self.records.clone())
    }
}

/// Records loaded from a CSV file with header `date,sales,profit,category`
#[derive(Debug, Clone)]
pub struct CsvProvider {
    records: Vec<Record>,
}

impl CsvProvider {
    /// Load records from a file
    pub fn from_path(path: &Path, domain: &CategoryDomain) -> DashboardResult<Self> {
        let file = std::fs::File::open(path)?;
        let provider = Self::from_reader(file, domain)?;
        tracing::info!(
            "Loaded {} records from {:?}",
            provider.records.len(),
            path
        );
        Ok(provider)
    }

    /// Load records from any reader
    pub fn from_reader<R: Read>(reader: R, domain: &CategoryDomain) -> DashboardResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<Record>() {
            let record = row?;
            if !domain.contains(&record.category) {
                return Err(DashboardError::UnknownCategory(record.category));
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, _filter: &FilterState) -> DashboardResult<Vec<Record>> {
        Ok(self.records.clone())
    }
}

/// Write records as CSV with the same header `CsvProvider` reads
pub fn write_csv<W: Write>(writer: W, records: &[&Record]) -> DashboardResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_synthetic_shape() {
        let domain = CategoryDomain::default();
        let provider = SyntheticProvider::generate(&domain, start(), 100, 42);
        let records = provider.records();

        assert_eq!(records.len(), 100);
        assert_eq!(records[0].date, start());
        assert_eq!(
            records[99].date,
            NaiveDate::from_ymd_opt(2023, 4, 10).unwrap()
        );

        for record in records {
            assert!((100..1000).contains(&record.sales));
            assert!((10..100).contains(&record.profit));
            assert!(domain.contains(&record.category));
        }

        let dates: HashSet<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates.len(), 100);
    }

    #[test]
    fn test_synthetic_is_deterministic() {
        let domain = CategoryDomain::default();
        let a = SyntheticProvider::generate(&domain, start(), 50, 7);
        let b = SyntheticProvider::generate(&domain, start(), 50, 7);
        let c = SyntheticProvider::generate(&domain, start(), 50, 8);

        assert_eq!(a.records(), b.records());
        assert_ne!(a.records(), c.records());
    }

    #[test]
    fn test_csv_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let domain = CategoryDomain::default();

        let original = SyntheticProvider::generate(&domain, start(), 10, 1);
        let borrowed: Vec<&Record> = original.records().iter().collect();
        let file = std::fs::File::create(&path).unwrap();
        write_csv(file, &borrowed).unwrap();

        let loaded = CsvProvider::from_path(&path, &domain).unwrap();
        assert_eq!(loaded.records(), original.records());
    }

    #[test]
    fn test_csv_rejects_unknown_category() {
        let data = "date,sales,profit,category\n2023-01-01,500,50,A\n2023-01-02,400,40,Z\n";
        let result = CsvProvider::from_reader(data.as_bytes(), &CategoryDomain::default());
        assert!(matches!(result, Err(DashboardError::UnknownCategory(c)) if c == "Z"));
    }

    #[test]
    fn test_csv_rejects_bad_date() {
        let data = "date,sales,profit,category\n01/01/2023,500,50,A\n";
        let result = CsvProvider::from_reader(data.as_bytes(), &CategoryDomain::default());
        assert!(matches!(result, Err(DashboardError::Csv(_))));
    }

    #[test]
    fn test_write_csv_header() {
        let record = Record::new(start(), 120, 12, "B");
        let mut out = Vec::new();
        write_csv(&mut out, &[&record]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "date,sales,profit,category\n2023-01-01,120,12,B\n");
    }
}
