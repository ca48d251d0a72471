//! CSV and JSON export of record sequences.
//!
//! Both formats refuse an empty sequence with [`ClosureError::EmptyExport`]
//! so callers never produce an empty download.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ClosureError, Result};
use crate::record::ClosureRecord;

/// Dataset name used in export file names.
pub const DEFAULT_DATASET_NAME: &str = "maharashtra-school-closures";

/// CSV column headers, in output order.
pub const CSV_HEADERS: [&str; 9] = [
    "School Name",
    "District",
    "Village",
    "Year of Closure",
    "Reason for Closure",
    "Students Before Closure",
    "Where Students Go",
    "Community Opinion",
    "Date Added",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Media type for downloads.
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    /// Upper-case name for messages ("CSV", "JSON").
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv or json.", s)),
        }
    }
}

/// Serialize records in the requested format.
pub fn export<'a, I>(records: I, format: ExportFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a ClosureRecord>,
{
    match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Json => to_json(records),
    }
}

/// Serialize records as CSV.
///
/// Text fields and the date are always double-quoted with embedded quotes
/// doubled; the year and student count are bare. Lines are separated by `\n`
/// with no trailing newline.
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ClosureRecord>,
{
    let mut records = records.into_iter().peekable();
    if records.peek().is_none() {
        return Err(ClosureError::EmptyExport);
    }

    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(CSV_HEADERS)?;
    let bytes = header
        .into_inner()
        .map_err(|e| ClosureError::Csv(e.into_error().into()))?;
    let header = String::from_utf8(bytes).map_err(|e| {
        ClosureError::Csv(std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    })?;

    let mut lines = vec![header.trim_end_matches('\n').to_string()];
    lines.extend(records.map(csv_row));
    Ok(lines.join("\n"))
}

fn csv_row(record: &ClosureRecord) -> String {
    [
        quote(&record.school_name),
        quote(&record.district),
        quote(&record.village),
        record.year_of_closure.to_string(),
        quote(&record.reason_for_closure),
        record.students_before_closure.to_string(),
        quote(&record.where_students_go),
        quote(&record.community_opinion),
        quote(&record.date_added.to_string()),
    ]
    .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Serialize records as a pretty-printed JSON array.
pub fn to_json<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ClosureRecord>,
{
    let records: Vec<&ClosureRecord> = records.into_iter().collect();
    if records.is_empty() {
        return Err(ClosureError::EmptyExport);
    }
    Ok(serde_json::to_string_pretty(&records)?)
}

/// File name for an export: `<dataset>-<YYYY-MM-DD>.<ext>`.
pub fn export_filename(dataset: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}-{}.{}",
        dataset,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}
