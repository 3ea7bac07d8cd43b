//! Core data types for the dashboard
//!
//! - `Record`: one day of sales/profit for a category
//! - `CategoryDomain`: the categories the select widget offers
//! - `CategoryFilter` and `FilterState`: the sidebar filter values

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dashboard::error::{DashboardError, DashboardResult};

/// Sentinel option meaning "no category filtering"
pub const ALL_CATEGORIES: &str = "All";

/// A single dashboard record
///
/// Records are immutable once a provider has produced them; filtering
/// borrows them, it never rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Calendar day of the record
    pub date: NaiveDate,
    /// Sales amount
    pub sales: i64,
    /// Profit amount
    pub profit: i64,
    /// Category name, always a member of the domain
    pub category: String,
}

impl Record {
    pub fn new(date: NaiveDate, sales: i64, profit: i64, category: impl Into<String>) -> Self {
        Self {
            date,
            sales,
            profit,
            category: category.into(),
        }
    }
}

/// The fixed set of categories, injected through configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDomain {
    categories: Vec<String>,
}

impl CategoryDomain {
    /// Create a domain, rejecting empty lists, duplicates and the `All` sentinel
    pub fn new<I, S>(categories: I) -> DashboardResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut result: Vec<String> = Vec::new();

        for category in categories {
            let category = category.into();
            if category.trim().is_empty() {
                return Err(DashboardError::InvalidDomain(
                    "category names cannot be blank".to_string(),
                ));
            }
            if category == ALL_CATEGORIES {
                return Err(DashboardError::InvalidDomain(format!(
                    "'{}' is reserved for the unfiltered option",
                    ALL_CATEGORIES
                )));
            }
            if result.contains(&category) {
                return Err(DashboardError::InvalidDomain(format!(
                    "duplicate category '{}'",
                    category
                )));
            }
            result.push(category);
        }

        if result.is_empty() {
            return Err(DashboardError::InvalidDomain(
                "at least one category is required".to_string(),
            ));
        }

        Ok(Self { categories: result })
    }

    /// Categories in configured order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Position of a category in configured order
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Options for the category select widget: `All` then the sorted categories
    pub fn options(&self) -> Vec<String> {
        let mut sorted = self.categories.clone();
        sorted.sort();

        let mut options = Vec::with_capacity(sorted.len() + 1);
        options.push(ALL_CATEGORIES.to_string());
        options.extend(sorted);
        options
    }
}

impl Default for CategoryDomain {
    fn default() -> Self {
        Self {
            categories: ["A", "B", "C", "D"].iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Category part of the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Sentinel selected: keep every category
    All,
    /// Keep only this category (exact match)
    Only(String),
}

impl CategoryFilter {
    /// Parse a select-widget value against the domain
    pub fn parse(input: &str, domain: &CategoryDomain) -> DashboardResult<Self> {
        if input == ALL_CATEGORIES {
            return Ok(CategoryFilter::All);
        }

        if domain.contains(input) {
            Ok(CategoryFilter::Only(input.to_string()))
        } else {
            Err(DashboardError::UnknownCategory(input.to_string()))
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// First and last day the date widget lets a user pick (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    /// Bounds spanning a record set, `None` when it is empty
    pub fn of_records(records: &[Record]) -> Option<Self> {
        let min = records.iter().map(|r| r.date).min()?;
        let max = records.iter().map(|r| r.date).max()?;
        Some(Self { min, max })
    }

    /// Accept a picked date only inside the bounds
    pub fn check(&self, date: NaiveDate) -> DashboardResult<NaiveDate> {
        if date < self.min || date > self.max {
            return Err(DashboardError::DateOutOfRange {
                date,
                min: self.min,
                max: self.max,
            });
        }
        Ok(date)
    }
}

/// Sidebar filter values for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// First day kept (inclusive)
    pub start_date: NaiveDate,
    /// Last day kept (inclusive)
    pub end_date: NaiveDate,
}

impl FilterState {
    pub fn new(category: CategoryFilter, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            category,
            start_date,
            end_date,
        }
    }

    /// Default widget value: every category over the whole bounded range
    pub fn within(bounds: DateBounds) -> Self {
        Self::new(CategoryFilter::All, bounds.min, bounds.max)
    }

    /// Default widget value: every category over the whole generated range
    pub fn full_range(start_date: NaiveDate, days: usize) -> Self {
        let span = days.saturating_sub(1) as i64;
        Self {
            category: CategoryFilter::All,
            start_date,
            end_date: start_date + Duration::days(span),
        }
    }

    /// Builder: replace the category filter
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Builder: replace the date range
    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Check if a record passes both the date and the category filter
    pub fn matches(&self, record: &Record) -> bool {
        record.date >= self.start_date
            && record.date <= self.end_date
            && self.category.matches(&record.category)
    }

    /// Parse a `YYYY-MM-DD` date-input value
    pub fn parse_date(s: &str) -> DashboardResult<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| DashboardError::InvalidDate(s.to_string()))
    }
}
