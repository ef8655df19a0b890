//! Terminal host for studynote.
//!
//! # Responsibility
//! - Open the notes app over SQLite (or memory) and hand it to the shell.
//! - Keep the same logging bootstrap as the Flutter host.

mod cli;
mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::info;
use std::path::Path;
use studynote_core::db::open_db;
use studynote_core::{
    default_log_level, init_logging, AppConfig, MemoryKeyValueRepository, NotesApp,
    SqliteKeyValueRepository,
};

fn main() -> std::process::ExitCode {
    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }

    let config = load_config(cli.config.as_deref())?;
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    if cli.memory {
        info!("event=cli_start module=cli status=ok backend=memory");
        let mut app = NotesApp::open(MemoryKeyValueRepository::new(), config);
        return shell::run_shell(&mut app, stdin, stdout);
    }

    let path = cli.db_path();
    let conn = open_db(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let repo = SqliteKeyValueRepository::try_new(conn).context("failed to prepare notes table")?;
    info!("event=cli_start module=cli status=ok backend=sqlite");
    let mut app = NotesApp::open(repo, config);
    shell::run_shell(&mut app, stdin, stdout)
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    AppConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}
