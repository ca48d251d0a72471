//! Serve command - run the local JSON API.

use colored::Colorize;

use super::{Session, describe};
use crate::server::{app, state::AppState};

pub fn run(session: &Session, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let registry = session.open().map_err(describe)?;
    let record_count = registry.records().len();
    let state = AppState::new(registry);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Serving school closure records at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Data: {}", session.data_dir.display());
    println!("  Records: {}", record_count);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))
}
