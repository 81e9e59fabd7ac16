//! `invest` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from `.env`, the environment, and flags.
//! - Open storage once and hand every command to the core services.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use commands::App;
use invest_core::{init_logging, Config, ConnectionPool, DbLocation, EventLog};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    let config = resolve_config(&cli)?;
    init_logging(&config.log_level, config.log_sink.clone()).map_err(anyhow::Error::msg)?;
    log::debug!(
        "event=cli_start module=cli status=ok db={} max_idle={}",
        config.db_location,
        config.db_max_idle
    );

    let pool = ConnectionPool::open(config.db_location.clone(), config.db_max_idle)
        .with_context(|| format!("failed to open database {}", config.db_location))?;
    let app = App::try_new(&pool, &EventLog::new())?;

    let stdout = std::io::stdout();
    app.execute(cli.command, &mut stdout.lock())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(db) = &cli.db {
        config.db_location = DbLocation::parse(&db.to_string_lossy());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}
