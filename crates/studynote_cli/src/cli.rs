use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interactive shell over the studynote core for manual smoke tests."
)]
pub struct Cli {
    /// SQLite database holding the note collection.
    #[arg(long, value_name = "PATH", env = "STUDYNOTE_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Keep notes in memory only; overrides `--db`.
    #[arg(long, action = ArgAction::SetTrue)]
    pub memory: bool,

    /// JSON file overriding app configuration fields.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode.
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Database path when running against SQLite.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("studynote.sqlite3"))
    }
}
