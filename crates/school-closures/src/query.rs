//! Filtering, summary statistics and filter options for the dashboard.
//!
//! Everything here is a pure function of the full record set: filters are
//! always evaluated against every record, and summary statistics ignore the
//! filter entirely.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClosureError, Result};
use crate::record::ClosureRecord;

/// Text form of [`Selection::All`].
pub const ALL: &str = "all";

/// A filter choice: everything, or one specific value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this selection.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

impl Selection<i32> {
    /// Parse a year selection: `"all"` or an integer year.
    pub fn parse_year(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        trimmed
            .parse()
            .map(Selection::Only)
            .map_err(|_| ClosureError::InvalidFilter(format!("'{}' is not a year", trimmed)))
    }
}

impl Selection<String> {
    /// Parse a district selection: `"all"` or an exact district name.
    pub fn parse_district(raw: &str) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Only(raw.to_string())
        }
    }
}

/// Search term plus year and district selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against school name, district and village.
    pub search: String,
    pub year: Selection<i32>,
    pub district: Selection<String>,
}

impl RecordFilter {
    /// The identity filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from the textual parameters a form or query string supplies.
    pub fn from_params(search: &str, year: &str, district: &str) -> Result<Self> {
        Ok(Self {
            search: search.to_string(),
            year: Selection::parse_year(year)?,
            district: Selection::parse_district(district),
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Selection::Only(year);
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Selection::Only(district.into());
        self
    }

    /// Whether the filter lets every record through.
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.year == Selection::All && self.district == Selection::All
    }

    /// Whether a record satisfies all three predicates.
    pub fn matches(&self, record: &ClosureRecord) -> bool {
        self.matches_lowered(record, &self.search.to_lowercase())
    }

    fn matches_lowered(&self, record: &ClosureRecord, needle: &str) -> bool {
        let search_hit = needle.is_empty()
            || record.school_name.to_lowercase().contains(needle)
            || record.district.to_lowercase().contains(needle)
            || record.village.to_lowercase().contains(needle);

        search_hit
            && self.year.admits(&record.year_of_closure)
            && self.district.admits(&record.district)
    }
}

/// Records matching `filter`, in their original order.
pub fn apply_filter<'a>(
    records: &'a [ClosureRecord],
    filter: &RecordFilter,
) -> Vec<&'a ClosureRecord> {
    let needle = filter.search.to_lowercase();
    records
        .iter()
        .filter(|r| filter.matches_lowered(r, &needle))
        .collect()
}

/// Totals shown on the dashboard summary cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of records.
    pub total_schools: usize,
    /// Number of distinct districts.
    pub districts_affected: usize,
    /// Sum of students enrolled before closure.
    pub total_students_affected: u64,
}

/// Summary statistics over the full record set.
pub fn summarize(records: &[ClosureRecord]) -> Summary {
    let districts: BTreeSet<&str> = records.iter().map(|r| r.district.as_str()).collect();

    Summary {
        total_schools: records.len(),
        districts_affected: districts.len(),
        total_students_affected: records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.students_before_closure)),
    }
}

/// Distinct districts present in the data, ascending.
pub fn district_options(records: &[ClosureRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.district.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct years present in the data, most recent first.
pub fn year_options(records: &[ClosureRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year_of_closure)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Why the filtered table is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// No records exist at all.
    NoData,
    /// Records exist but none pass the filter.
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoData => {
                "No data available. Start by adding some school closure records."
            }
            EmptyState::NoMatches => "No records match your current filters.",
        }
    }
}

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Totals over the full record set.
    pub summary: Summary,
    /// Rows passing the filter.
    pub records: Vec<ClosureRecord>,
    /// Number of rows passing the filter.
    pub filtered_count: usize,
    pub district_options: Vec<String>,
    pub year_options: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

impl DashboardView {
    /// Build the view from the full record set.
    pub fn build(records: &[ClosureRecord], filter: &RecordFilter) -> Self {
        let filtered: Vec<ClosureRecord> =
            apply_filter(records, filter).into_iter().cloned().collect();

        let empty_state = if records.is_empty() {
            Some(EmptyState::NoData)
        } else if filtered.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        };

        Self {
            summary: summarize(records),
            filtered_count: filtered.len(),
            records: filtered,
            district_options: district_options(records),
            year_options: year_options(records),
            empty_state,
        }
    }
}
