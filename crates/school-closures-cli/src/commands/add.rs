//! Add command - validate and record one school closure.

use school_closures::{Notice, ValidationConfig};

use super::{Session, describe, print_notice};
use crate::cli::FormArgs;

pub fn run(
    session: &Session,
    form: FormArgs,
    strict_district: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = session
        .config()
        .with_validation(ValidationConfig::new().with_known_districts_only(strict_district));
    let mut registry = session.open_with(config).map_err(describe)?;

    let record = registry.submit(&form.to_form()).map_err(describe)?;
    print_notice(&Notice::saved(&record));

    if session.verbose {
        println!("  id: {}", record.id);
        println!("  total records: {}", registry.records().len());
    }

    Ok(())
}
