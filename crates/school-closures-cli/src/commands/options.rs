//! Options command - filter choices present in the stored data.

use colored::Colorize;
use school_closures::{district_options, year_options};

use super::{Session, describe};

pub fn run(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let registry = session.open().map_err(describe)?;
    let districts = district_options(registry.records());
    let years = year_options(registry.records());

    println!("{}", "Districts".cyan().bold());
    if districts.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for district in &districts {
        println!("  {}", district);
    }

    println!();
    println!("{}", "Years".cyan().bold());
    if years.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for year in &years {
        println!("  {}", year);
    }

    Ok(())
}
