//! The registry: one entry point tying validation, storage, queries and export together.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::error::{ClosureError, Result};
use crate::export::{self, DEFAULT_DATASET_NAME, ExportFormat};
use crate::query::{self, DashboardView, RecordFilter, Summary};
use crate::record::{ClosureForm, ClosureRecord};
use crate::store::{DEFAULT_STORAGE_KEY, MemoryStorage, RecordStore, Storage};
use crate::validation::{ValidationConfig, Validator};

/// Configuration for a [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Storage key the record collection lives under.
    pub storage_key: String,
    /// Validation rules for submitted forms.
    pub validation: ValidationConfig,
    /// Dataset name used in export file names.
    pub dataset_name: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            validation: ValidationConfig::default(),
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = name.into();
        self
    }
}

/// A finished export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    /// Suggested file name, `<dataset>-<date>.<ext>`.
    pub filename: String,
    pub format: ExportFormat,
    pub contents: String,
    /// Number of records in the export.
    pub record_count: usize,
}

impl ExportFile {
    /// Write the contents to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.contents).map_err(|source| ClosureError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Validated, persistent collection of closure records with dashboard queries.
#[derive(Debug)]
pub struct Registry<S: Storage> {
    config: RegistryConfig,
    validator: Validator,
    store: RecordStore<S>,
}

impl Registry<MemoryStorage> {
    /// A registry that keeps records only for the lifetime of the process.
    pub fn in_memory() -> Result<Self> {
        Self::open(MemoryStorage::new())
    }
}

impl<S: Storage> Registry<S> {
    /// Open a registry with default configuration.
    pub fn open(storage: S) -> Result<Self> {
        Self::with_config(storage, RegistryConfig::default())
    }

    /// Open a registry with custom configuration.
    pub fn with_config(storage: S, config: RegistryConfig) -> Result<Self> {
        let store = RecordStore::open_with_key(storage, config.storage_key.clone())?;
        let validator = Validator::with_config(config.validation.clone());

        Ok(Self {
            config,
            validator,
            store,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    /// Every record, in insertion order.
    pub fn records(&self) -> &[ClosureRecord] {
        self.store.all()
    }

    /// Warning left by an unreadable collection on open, if any.
    pub fn load_warning(&self) -> Option<&str> {
        self.store.load_warning()
    }

    /// Validate a form and store the resulting record.
    ///
    /// Nothing is stored when validation fails.
    pub fn submit(&mut self, form: &ClosureForm) -> Result<ClosureRecord> {
        let payload = self.validator.validate(form)?;
        self.store.append(payload)
    }

    /// Summary statistics over every record.
    pub fn summary(&self) -> Summary {
        query::summarize(self.store.all())
    }

    /// The dashboard for one filter state.
    pub fn dashboard(&self, filter: &RecordFilter) -> DashboardView {
        DashboardView::build(self.store.all(), filter)
    }

    /// Export the records passing `filter`, named with today's date.
    pub fn export(&self, filter: &RecordFilter, format: ExportFormat) -> Result<ExportFile> {
        self.export_dated(filter, format, Utc::now().date_naive())
    }

    /// Export the records passing `filter`, named with an explicit date.
    pub fn export_dated(
        &self,
        filter: &RecordFilter,
        format: ExportFormat,
        date: NaiveDate,
    ) -> Result<ExportFile> {
        let selected = query::apply_filter(self.store.all(), filter);
        let record_count = selected.len();
        let contents = export::export(selected, format)?;

        tracing::info!(
            records = record_count,
            format = %format,
            "exported closure records"
        );

        Ok(ExportFile {
            filename: export::export_filename(&self.config.dataset_name, date, format),
            format,
            contents,
            record_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FormField;

    fn form(school: &str, district: &str, year: &str) -> ClosureForm {
        ClosureForm::new()
            .with_field(FormField::SchoolName, school)
            .with_field(FormField::District, district)
            .with_field(FormField::Village, "Shirur")
            .with_field(FormField::YearOfClosure, year)
            .with_field(FormField::ReasonForClosure, "Low student enrollment")
            .with_field(FormField::StudentsBeforeClosure, "45")
            .with_field(FormField::WhereStudentsGo, "Government School, Shirur Town")
    }

    #[test]
    fn test_submit_and_query() {
        let mut registry = Registry::in_memory().unwrap();
        registry.submit(&form("Zilla Parishad School", "Pune", "2022")).unwrap();

        let view = registry.dashboard(&RecordFilter::new().with_search("pune"));
        assert_eq!(view.filtered_count, 1);

        let view = registry.dashboard(&RecordFilter::new().with_search("nashik"));
        assert_eq!(view.filtered_count, 0);

        assert_eq!(
            registry.summary(),
            Summary {
                total_schools: 1,
                districts_affected: 1,
                total_students_affected: 45,
            }
        );
    }

    #[test]
    fn test_invalid_submission_stores_nothing() {
        let mut registry = Registry::in_memory().unwrap();
        let err = registry.submit(&form("ZP", "Pune", "2019")).unwrap_err();

        assert!(err.is_validation());
        assert!(registry.records().is_empty());
        assert_eq!(registry.store().storage().write_count(), 0);
    }

    #[test]
    fn test_strict_config() {
        let config = RegistryConfig::new()
            .with_validation(ValidationConfig::new().with_known_districts_only(true));
        let mut registry = Registry::with_config(MemoryStorage::new(), config).unwrap();

        assert!(registry.submit(&form("ZP", "Atlantis", "2022")).is_err());
        assert!(registry.submit(&form("ZP", "Pune", "2022")).is_ok());
    }

    #[test]
    fn test_export_filtered() {
        let mut registry = Registry::in_memory().unwrap();
        registry.submit(&form("A", "Pune", "2022")).unwrap();
        registry.submit(&form("B", "Satara", "2023")).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let file = registry
            .export_dated(&RecordFilter::new().with_district("Satara"), ExportFormat::Csv, date)
            .unwrap();

        assert_eq!(file.filename, "maharashtra-school-closures-2025-02-03.csv");
        assert_eq!(file.record_count, 1);
        assert_eq!(file.contents.lines().count(), 2);
    }

    #[test]
    fn test_export_with_no_matches_fails() {
        let mut registry = Registry::in_memory().unwrap();
        registry.submit(&form("A", "Pune", "2022")).unwrap();

        let err = registry
            .export(&RecordFilter::new().with_year(2020), ExportFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ClosureError::EmptyExport));
    }

    #[test]
    fn test_custom_dataset_and_key() {
        let config = RegistryConfig::new()
            .with_storage_key("pilot")
            .with_dataset_name("pilot-survey");
        let mut registry = Registry::with_config(MemoryStorage::new(), config).unwrap();
        registry.submit(&form("A", "Pune", "2022")).unwrap();

        assert!(registry.store().storage().get("pilot").is_some());
        let date = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let file = registry
            .export_dated(&RecordFilter::new(), ExportFormat::Json, date)
            .unwrap();
        assert_eq!(file.filename, "pilot-survey-2025-02-03.json");
    }

    #[test]
    fn test_write_export_to_missing_directory() {
        let mut registry = Registry::in_memory().unwrap();
        registry.submit(&form("A", "Pune", "2022")).unwrap();
        let file = registry.export(&RecordFilter::new(), ExportFormat::Csv).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let err = file
            .write_to(dir.path().join("missing").join("out.csv"))
            .unwrap_err();
        assert!(matches!(err, ClosureError::Io { .. }));

        let path = dir.path().join("out.csv");
        file.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), file.contents);
    }
}
