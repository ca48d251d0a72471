//! User-facing outcome messages.
//!
//! Every operation the presentation layer triggers ends in exactly one
//! [`Notice`]: a short title plus a description naming the record, field or
//! condition involved.

use serde::{Deserialize, Serialize};

use crate::catalog::{MAX_YEAR, MIN_YEAR};
use crate::error::ClosureError;
use crate::export::ExportFormat;
use crate::record::ClosureRecord;
use crate::validation::ValidationError;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A titled outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    /// A record was stored.
    pub fn saved(record: &ClosureRecord) -> Self {
        Self::new(
            NoticeKind::Success,
            "Data saved successfully",
            format!(
                "School closure record for {} has been added",
                record.school_name
            ),
        )
    }

    /// Records were exported.
    pub fn exported(count: usize, format: ExportFormat) -> Self {
        Self::new(
            NoticeKind::Success,
            "Export successful",
            format!(
                "Exported {} {} to {}",
                count,
                if count == 1 { "record" } else { "records" },
                format.label()
            ),
        )
    }

    /// The stored collection was unreadable and the store started empty.
    pub fn load_warning(message: &str) -> Self {
        Self::new(NoticeKind::Warning, "Stored data could not be read", message)
    }

    /// Describe a failure.
    pub fn from_error(error: &ClosureError) -> Self {
        match error {
            ClosureError::Validation(e) => Self::from_validation(e),
            ClosureError::Persistence { message, .. } => Self::new(
                NoticeKind::Error,
                "Error saving data",
                format!(
                    "There was an error accessing the school closure records: {}",
                    message
                ),
            ),
            ClosureError::EmptyExport => Self::new(
                NoticeKind::Error,
                "No data to export",
                "Please add some data first or adjust your filters.",
            ),
            ClosureError::Io { path, source } => Self::new(
                NoticeKind::Error,
                "Error writing file",
                format!("Could not write '{}': {}", path.display(), source),
            ),
            ClosureError::InvalidFilter(message) => {
                Self::new(NoticeKind::Error, "Invalid filter", message.clone())
            }
            other => Self::new(NoticeKind::Error, "Unexpected error", other.to_string()),
        }
    }

    fn from_validation(error: &ValidationError) -> Self {
        match error {
            ValidationError::MissingFields(fields) => Self::new(
                NoticeKind::Error,
                "Missing required fields",
                format!(
                    "Please fill in all required fields: {}",
                    fields
                        .iter()
                        .map(|f| f.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            ValidationError::InvalidYear(raw) => Self::new(
                NoticeKind::Error,
                "Invalid year",
                format!(
                    "Year of closure must be between {} and {} (got '{}')",
                    MIN_YEAR, MAX_YEAR, raw
                ),
            ),
            ValidationError::InvalidStudentCount(raw) => {
                let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
                let is_integer = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
                let description = if is_integer && raw.starts_with('-') {
                    format!("Number of students cannot be negative (got '{}')", raw)
                } else if is_integer {
                    format!("Number of students is too large (got '{}')", raw)
                } else {
                    format!("Number of students must be a whole number (got '{}')", raw)
                };
                Self::new(NoticeKind::Error, "Invalid student count", description)
            }
            ValidationError::UnknownDistrict(district) => Self::new(
                NoticeKind::Error,
                "Unknown district",
                format!("'{}' is not a district of Maharashtra", district),
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
