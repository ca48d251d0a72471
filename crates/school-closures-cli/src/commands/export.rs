//! Export command - write records to a CSV or JSON file.

use std::path::PathBuf;

use school_closures::{ExportFormat, Notice};

use super::{Session, describe, print_notice};
use crate::cli::FilterArgs;

pub fn run(
    session: &Session,
    format: ExportFormat,
    output: Option<PathBuf>,
    dataset: Option<String>,
    filter: FilterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = filter.to_filter().map_err(describe)?;

    let mut config = session.config();
    if let Some(dataset) = dataset {
        config = config.with_dataset_name(dataset);
    }
    let registry = session.open_with(config).map_err(describe)?;

    let file = registry.export(&filter, format).map_err(describe)?;
    let output_path = output.unwrap_or_else(|| PathBuf::from(&file.filename));

    file.write_to(&output_path).map_err(describe)?;

    print_notice(&Notice::exported(file.record_count, format));
    println!("  Written to {}", output_path.display());

    Ok(())
}
