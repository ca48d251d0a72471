//! List command - show records matching a search and filters.

use colored::Colorize;
use school_closures::{DashboardView, EmptyState};

use super::{Session, describe};
use crate::cli::FilterArgs;

pub fn run(
    session: &Session,
    filter: FilterArgs,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = filter.to_filter().map_err(describe)?;
    let registry = session.open().map_err(describe)?;
    let view = registry.dashboard(&filter);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_table(&view);
    Ok(())
}

fn print_table(view: &DashboardView) {
    println!(
        "{} {} of {}",
        "Filtered results:".cyan().bold(),
        view.filtered_count.to_string().white().bold(),
        view.summary.total_schools
    );
    println!();

    match view.empty_state {
        Some(EmptyState::NoData) => {
            println!("{}", EmptyState::NoData.message().dimmed());
            println!("Add one with {}", "closures add".yellow());
            return;
        }
        Some(EmptyState::NoMatches) => {
            println!("{}", EmptyState::NoMatches.message().dimmed());
            return;
        }
        None => {}
    }

    for record in &view.records {
        println!(
            "{}  {}, {}",
            record.school_name.white().bold(),
            record.village,
            record.district.cyan()
        );
        println!(
            "    Closed {} · {} · {} students",
            record.year_of_closure.to_string().yellow(),
            record.reason_for_closure,
            record.students_before_closure
        );
        println!("    Students now go to: {}", record.where_students_go);
        println!("    Community opinion: {}", record.community_opinion.dimmed());
        println!(
            "    {} {}",
            format!("#{}", record.id).dimmed(),
            format!("added {}", record.date_added).dimmed()
        );
        println!();
    }
}
