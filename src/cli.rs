//! Command-line argument parsing for the sandbox.

use crate::config::{DatabaseConfig, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// An interactive console for practising SQL against a sample school database.
#[derive(Parser, Debug)]
#[command(name = "sql-sandbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(short = 'd', long, value_name = "PATH", conflicts_with = "memory")]
    pub database: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(short = 'm', long)]
    pub memory: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep existing tables instead of recreating the sample data
    #[arg(long)]
    pub no_seed: bool,

    /// Output format (table or json)
    #[arg(short = 'o', long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Execute one statement and exit
    #[arg(short = 'e', long, value_name = "SQL")]
    pub execute: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Database settings given on the command line only.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match (&self.database, self.memory) {
            (_, true) => DatabaseConfig::in_memory(),
            (Some(path), false) => DatabaseConfig::at_path(path),
            (None, false) => DatabaseConfig::default(),
        }
    }

    /// Returns true when running a single statement.
    pub fn is_one_shot(&self) -> bool {
        self.execute.is_some()
    }
}
