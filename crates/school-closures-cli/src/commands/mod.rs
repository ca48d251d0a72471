//! CLI command implementations.

pub mod add;
pub mod catalog;
pub mod export;
pub mod list;
pub mod options;
pub mod serve;
pub mod stats;

use std::path::PathBuf;

use colored::Colorize;
use school_closures::{ClosureError, FileStorage, Notice, NoticeKind, Registry, RegistryConfig};

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Session {
    pub data_dir: PathBuf,
    pub key: String,
    pub verbose: bool,
}

impl Session {
    pub fn new(data_dir: PathBuf, key: String, verbose: bool) -> Self {
        Self {
            data_dir,
            key,
            verbose,
        }
    }

    pub fn config(&self) -> RegistryConfig {
        RegistryConfig::new().with_storage_key(self.key.clone())
    }

    /// Open the registry with default validation.
    pub fn open(&self) -> Result<Registry<FileStorage>, ClosureError> {
        self.open_with(self.config())
    }

    /// Open the registry with a specific configuration.
    pub fn open_with(&self, config: RegistryConfig) -> Result<Registry<FileStorage>, ClosureError> {
        let registry = Registry::with_config(FileStorage::new(&self.data_dir), config)?;

        if self.verbose {
            eprintln!(
                "Loaded {} records from {}",
                registry.records().len(),
                registry
                    .store()
                    .storage()
                    .path_for(registry.store().key())
                    .display()
            );
        }
        if let Some(warning) = registry.load_warning() {
            print_notice(&Notice::load_warning(warning));
        }

        Ok(registry)
    }
}

/// Print a notice: successes to stdout, warnings and errors to stderr.
pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => {
            println!("{} {}", "✓".green().bold(), notice.title.green().bold());
            println!("  {}", notice.description);
        }
        NoticeKind::Warning => {
            eprintln!("{} {}", "Warning:".yellow().bold(), notice.title.yellow());
            eprintln!("  {}", notice.description);
        }
        NoticeKind::Error => {
            eprintln!("{} {}", "✗".red().bold(), notice.title.red().bold());
            eprintln!("  {}", notice.description);
        }
    }
}

/// Turn a library error into the message `main` reports.
pub fn describe(err: ClosureError) -> Box<dyn std::error::Error> {
    let notice = Notice::from_error(&err);
    format!("{}. {}", notice.title, notice.description).into()
}
