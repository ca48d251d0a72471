//! School closures CLI - record, explore and export school closures.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Session;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new(cli.data_dir, cli.key, cli.verbose);

    let result = match cli.command {
        Commands::Add {
            form,
            strict_district,
        } => commands::add::run(&session, form, strict_district),

        Commands::List { filter, json } => commands::list::run(&session, filter, json),

        Commands::Stats { json } => commands::stats::run(&session, json),

        Commands::Options => commands::options::run(&session),

        Commands::Export {
            format,
            output,
            dataset,
            filter,
        } => commands::export::run(&session, format, output, dataset, filter),

        Commands::Catalog => commands::catalog::run(),

        Commands::Serve { port } => commands::serve::run(&session, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
