//! SQL Sandbox - an interactive console for learning SQL.

use sql_sandbox::cli::Cli;
use sql_sandbox::config::{Config, DatabaseConfig};
use sql_sandbox::console::{Command, Console};
use sql_sandbox::db::{self, DatabaseClient};
use sql_sandbox::error::Result;
use sql_sandbox::{logging, seed};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if cli.is_one_shot() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    let one_shot = cli.is_one_shot();
    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e.message());
        // Interactive logs go to a file.
        if !one_shot {
            eprintln!("{}: {}", e.category(), e.message());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let database = resolve_database(&cli, &config);
    info!("Database: {}", database.display_string());

    let client = db::connect(&database).await?;
    let result = session(&cli, &config, client.as_ref()).await;

    if let Err(e) = client.close().await {
        warn!("Failed to close database: {e}");
    }
    result
}

async fn session(cli: &Cli, config: &Config, client: &dyn DatabaseClient) -> Result<()> {
    if config.console.seed_on_start && !cli.no_seed {
        seed::bootstrap(client).await?;
    }

    let format = cli.output.unwrap_or(config.console.output);
    let console = Console::new(client, format);

    match &cli.execute {
        Some(line) => {
            let output = console.try_dispatch(Command::parse(line)).await?;
            console.print(&output);
            Ok(())
        }
        None => console.run_interactive().await,
    }
}

/// Resolves database settings with precedence: CLI flags, config file,
/// environment, defaults.
fn resolve_database(cli: &Cli, config: &Config) -> DatabaseConfig {
    let mut database = config.database.clone();
    database.apply_env_defaults();
    database.merge(&cli.to_database_config());
    database
}

