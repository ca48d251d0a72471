//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use school_closures::store::DEFAULT_STORAGE_KEY;
use school_closures::{ClosureForm, ExportFormat, FormField, RecordFilter};

/// School closures: record and explore school closures in Maharashtra
#[derive(Parser)]
#[command(name = "closures")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the stored records
    #[arg(long, global = true, default_value = ".closures")]
    pub data_dir: PathBuf,

    /// Storage key of the record collection
    #[arg(long, global = true, default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a school closure
    Add {
        #[command(flatten)]
        form: FormArgs,

        /// Reject districts that are not districts of Maharashtra
        #[arg(long)]
        strict_district: bool,
    },

    /// List records, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show summary statistics over all records
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the district and year filter options present in the data
    Options,

    /// Export records to CSV or JSON
    Export {
        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output path (default: <dataset>-<date>.<ext> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Dataset name used in the default file name
        #[arg(long)]
        dataset: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the known districts and closure reasons
    Catalog,

    /// Serve the records over a local JSON API
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,
    },
}

/// The data-entry form, one flag per field.
///
/// Values are taken as raw text so validation reports exactly what was typed.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Name of the closed school
    #[arg(long, default_value = "")]
    pub school_name: String,

    /// District the school was in
    #[arg(long, default_value = "")]
    pub district: String,

    /// Village the school was in
    #[arg(long, default_value = "")]
    pub village: String,

    /// Year of closure (2020-2025)
    #[arg(long, default_value = "")]
    pub year: String,

    /// Reason for closure (see `closures catalog`)
    #[arg(long, default_value = "")]
    pub reason: String,

    /// Number of students before closure
    #[arg(long, default_value = "")]
    pub students: String,

    /// Where the students go now
    #[arg(long, default_value = "")]
    pub where_students_go: String,

    /// What the community thinks of the closure
    #[arg(long, default_value = "")]
    pub community_opinion: String,
}

impl FormArgs {
    pub fn to_form(&self) -> ClosureForm {
        ClosureForm::new()
            .with_field(FormField::SchoolName, self.school_name.as_str())
            .with_field(FormField::District, self.district.as_str())
            .with_field(FormField::Village, self.village.as_str())
            .with_field(FormField::YearOfClosure, self.year.as_str())
            .with_field(FormField::ReasonForClosure, self.reason.as_str())
            .with_field(FormField::StudentsBeforeClosure, self.students.as_str())
            .with_field(FormField::WhereStudentsGo, self.where_students_go.as_str())
            .with_field(FormField::CommunityOpinion, self.community_opinion.as_str())
    }
}

/// Search and filter selections shared by `list` and `export`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive search over school name, district and village
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Year of closure, or "all"
    #[arg(short, long, default_value = "all")]
    pub year: String,

    /// District, or "all"
    #[arg(short, long, default_value = "all")]
    pub district: String,
}

impl FilterArgs {
    pub fn to_filter(&self) -> school_closures::Result<RecordFilter> {
        RecordFilter::from_params(&self.search, &self.year, &self.district)
    }
}
