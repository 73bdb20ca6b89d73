mod calendar;
mod categorize;
mod db;
mod import;
mod ledger;
mod models;
mod money;
mod reports;
mod run;
mod settings;
mod suggest;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = run::Cli::parse();
    let settings = settings::Settings::load()?;
    init_tracing(&settings.log_level);

    let db_path = settings.database_path()?;
    let mut db = db::Database::open(&db_path)?;
    run::execute(cli.command, &mut db)
}

/// Logs go to stderr so tables on stdout stay clean. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
