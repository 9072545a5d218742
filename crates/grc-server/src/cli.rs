use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grc_core::config::{CliOverrides, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "grc-server")]
#[command(about = "Compliance risk register HTTP API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./grc.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (sqlite or memory)
    #[arg(long, global = true)]
    pub backend: Option<StorageBackend>,

    /// SQLite database path (":memory:" for a throwaway database)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Bind host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bind port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Log level or EnvFilter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Print the resolved configuration as TOML
    ShowConfig,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            backend: self.backend,
            db_path: self.db_path.clone(),
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        }
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
