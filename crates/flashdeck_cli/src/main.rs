//! Text front end over `flashdeck_core`.
//!
//! # Responsibility
//! - Collect one command, apply it to the store, re-query and print state.
//! - Keep all rendering outside the core crate.

mod command;
mod session;

use clap::Parser;
use command::Cli;
use flashdeck_core::db::{open_db, open_db_in_memory};
use flashdeck_core::{init_logging, CoreConfig, DeckStore, SqliteStateRepository};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;
    let repo = SqliteStateRepository::with_slot_key(&conn, config.slot_key.as_str())
        .map_err(|err| err.to_string())?;
    info!(
        "event=cli_command module=cli status=start command={} slot={}",
        cli.command.name(),
        repo.slot_key()
    );
    let mut store = DeckStore::open(repo);

    session::execute(&mut store, cli.command, &mut std::io::stdout().lock())?;
    if store.last_persist_failed() {
        eprintln!("warning: changes could not be saved and will be lost on exit");
    }
    Ok(())
}
