//! Interactive SQL learning console.
//!
//! Parses each input line into a [`Command`], dispatches it against a
//! [`DatabaseClient`], and prints the rendered [`CommandOutput`]. Statement
//! failures are printed and the loop continues.

pub mod output;

pub use output::{footer, CommandOutput, GOODBYE};

use crate::catalog;
use crate::config::OutputFormat;
use crate::db::DatabaseClient;
use crate::error::{Result, SandboxError};
use crate::health;
use crate::records;
use crate::stats;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Prompt shown while waiting for input.
pub const PROMPT: &str = "SQL> ";

/// A parsed console input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Execute a SQL statement.
    Sql(String),
    /// Show worked examples.
    Help,
    /// List the sample query catalog.
    Samples,
    /// List the practice tables.
    Tables,
    /// Show database statistics.
    Stats,
    /// List students by name.
    Students,
    /// List books by title.
    Books,
    /// List orders with student and book details.
    Orders,
    /// Check connectivity.
    Health,
    /// Leave the console.
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parses one line of input. Keywords are case-insensitive and may carry
    /// a trailing semicolon; anything else is SQL.
    pub fn parse(input: &str) -> Command {
        let input = input.trim();
        if input.is_empty() {
            return Command::Empty;
        }

        let keyword = input.trim_end_matches(';').trim().to_lowercase();
        match keyword.as_str() {
            "quit" | "exit" => Command::Quit,
            "help" => Command::Help,
            "samples" => Command::Samples,
            "tables" => Command::Tables,
            "stats" => Command::Stats,
            "students" => Command::Students,
            "books" => Command::Books,
            "orders" => Command::Orders,
            "health" => Command::Health,
            _ => Command::Sql(input.to_string()),
        }
    }
}

/// Console bound to one database client.
pub struct Console<'a> {
    client: &'a dyn DatabaseClient,
    format: OutputFormat,
}

impl<'a> Console<'a> {
    /// Creates a console printing in `format`.
    pub fn new(client: &'a dyn DatabaseClient, format: OutputFormat) -> Self {
        Self { client, format }
    }

    /// Output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Runs one command, propagating failures.
    pub async fn try_dispatch(&self, command: Command) -> Result<CommandOutput> {
        Ok(match command {
            Command::Empty => CommandOutput::Empty,
            Command::Quit => CommandOutput::Exit,
            Command::Help => CommandOutput::info(catalog::examples_help()),
            Command::Samples => CommandOutput::Samples(catalog::sample_queries().to_vec()),
            Command::Tables => CommandOutput::Tables(catalog::table_names().to_vec()),
            Command::Health => CommandOutput::Health(health::check(self.client).await),
            Command::Stats => CommandOutput::Stats(stats::collect(self.client).await?),
            Command::Students => {
                CommandOutput::Students(records::list_students(self.client).await?)
            }
            Command::Books => CommandOutput::Books(records::list_books(self.client).await?),
            Command::Orders => CommandOutput::Orders(records::list_orders(self.client).await?),
            Command::Sql(sql) => CommandOutput::Query(self.client.execute_query(&sql).await?),
        })
    }

    /// Runs one command. Failures are returned as [`CommandOutput::Error`].
    pub async fn dispatch(&self, command: Command) -> CommandOutput {
        self.try_dispatch(command).await.unwrap_or_else(|e| {
            debug!("Command failed: {e}");
            e.into()
        })
    }

    /// Parses and runs one line.
    pub async fn handle_line(&self, line: &str) -> CommandOutput {
        self.dispatch(Command::parse(line)).await
    }

    /// Prints an output to stdout, or stderr for errors.
    pub fn print(&self, output: &CommandOutput) {
        let rendered = output.render(self.format);
        if output.is_error() {
            eprintln!("{rendered}");
        } else if !rendered.is_empty() {
            println!("{rendered}");
        }
    }

    /// Prints the welcome banner.
    pub fn print_banner(&self) {
        println!("Welcome to the SQL learning console!");
        println!("Connected to {}", self.client.location());
        println!("Type 'help' for examples, 'quit' to exit");
    }

    /// Runs the read-eval-print loop until `quit`, end of input or a
    /// terminal failure.
    pub async fn run_interactive(&self) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| SandboxError::io(format!("Failed to start line editor: {e}")))?;

        let history_file = history_path();
        if let Some(path) = history_file.as_ref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                debug!("Failed to load history: {e}");
            }
        }

        self.print_banner();

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = editor.add_history_entry(line.trim()) {
                            debug!("Failed to record history entry: {e}");
                        }
                    }

                    let output = self.handle_line(&line).await;
                    self.print(&output);
                    if output.is_exit() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{GOODBYE}");
                    break;
                }
                Err(e) => {
                    error!("Readline error: {e}");
                    break;
                }
            }
        }

        if let Some(path) = history_file {
            save_history(&mut editor, &path);
        }
        info!("Console closed");
        Ok(())
    }
}

/// Location of the persisted line history.
pub fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("sql-sandbox").join("history"))
}

fn save_history(editor: &mut DefaultEditor, path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            debug!("Failed to create history directory: {e}");
        }
    }
    if let Err(e) = editor.save_history(path) {
        debug!("Failed to save history: {e}");
    }
}
