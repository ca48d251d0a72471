//! Stats command - summary statistics over all records.

use colored::Colorize;

use super::{Session, describe};

pub fn run(session: &Session, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = session.open().map_err(describe)?;
    let summary = registry.summary();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "School closure summary".cyan().bold());
    println!();
    println!(
        "  Total schools closed:     {}",
        summary.total_schools.to_string().white().bold()
    );
    println!(
        "  Districts affected:       {}",
        summary.districts_affected.to_string().white().bold()
    );
    println!(
        "  Students affected:        {}",
        summary.total_students_affected.to_string().white().bold()
    );

    Ok(())
}
