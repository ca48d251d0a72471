//! School closures: a community registry of closed schools in Maharashtra.
//!
//! Volunteers submit closure reports through a form; each report is validated,
//! stamped with an id and date, and appended to a durable collection. The
//! collection can then be searched, filtered, summarised and exported.
//!
//! # Core Principles
//!
//! - **Append-only**: Records are never edited or removed
//! - **Validate at the edge**: Nothing reaches storage without passing the [`Validator`]
//! - **Pure queries**: Filtering and statistics never mutate the collection
//!
//! # Example
//!
//! ```
//! use school_closures::{ClosureForm, FormField, RecordFilter, Registry};
//!
//! let mut registry = Registry::in_memory().unwrap();
//!
//! let form = ClosureForm::new()
//!     .with_field(FormField::SchoolName, "Zilla Parishad School")
//!     .with_field(FormField::District, "Pune")
//!     .with_field(FormField::Village, "Shirur")
//!     .with_field(FormField::YearOfClosure, "2022")
//!     .with_field(FormField::ReasonForClosure, "Low student enrollment")
//!     .with_field(FormField::StudentsBeforeClosure, "45")
//!     .with_field(FormField::WhereStudentsGo, "Government School, Shirur Town");
//!
//! registry.submit(&form).unwrap();
//!
//! let view = registry.dashboard(&RecordFilter::new().with_search("pune"));
//! assert_eq!(view.filtered_count, 1);
//! assert_eq!(view.summary.total_students_affected, 45);
//! ```

pub mod catalog;
pub mod error;
pub mod export;
pub mod notice;
pub mod query;
pub mod record;
pub mod store;
pub mod validation;

mod registry;

pub use crate::registry::{ExportFile, Registry, RegistryConfig};
pub use error::{ClosureError, Result};
pub use export::{ExportFormat, export_filename, to_csv, to_json};
pub use notice::{Notice, NoticeKind};
pub use query::{
    DashboardView, EmptyState, RecordFilter, Selection, Summary, apply_filter, district_options,
    summarize, year_options,
};
pub use record::{ClosureForm, ClosureRecord, FormField, NOT_PROVIDED, ValidatedPayload};
pub use store::{FileStorage, MemoryStorage, RecordStore, Storage};
pub use validation::{ValidationConfig, ValidationError, Validator, validate};
