//! Catalog command - the district and closure reason choices of the form.

use colored::Colorize;
use school_closures::catalog::{CLOSURE_REASONS, DISTRICTS, MAX_YEAR, MIN_YEAR};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{} ({})", "Districts".cyan().bold(), DISTRICTS.len());
    for district in DISTRICTS {
        println!("  {}", district);
    }

    println!();
    println!("{}", "Reasons for closure".cyan().bold());
    for reason in CLOSURE_REASONS {
        println!("  {}", reason);
    }

    println!();
    println!(
        "{} {} to {}",
        "Years of closure:".cyan().bold(),
        MIN_YEAR,
        MAX_YEAR
    );

    Ok(())
}
