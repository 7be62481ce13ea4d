//! SQLite database client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatabaseClient`
//! trait using sqlx. A connection is opened for every call and closed before
//! the call returns; in-memory databases additionally hold one idle
//! connection so their contents outlive individual calls.

use crate::config::DatabaseConfig;
use crate::db::{DatabaseClient, QueryResult, Value};
use crate::error::{Result, SandboxError};
use crate::query::{self, validate_sql};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    options: SqliteConnectOptions,
    location: String,
    keepalive: Mutex<Option<SqliteConnection>>,
}

impl SqliteClient {
    /// Opens a client for `config`, verifying the database can be reached.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        if let Some(path) = config.resolved_path() {
            ensure_parent_dirs(&path)?;
        }

        let options = config.connect_options()?;
        let location = config.display_string();

        // The first connection doubles as the keep-alive for in-memory databases.
        let first = connect_with(&options, &location).await?;
        let keepalive = if config.in_memory {
            Some(first)
        } else {
            release(first).await;
            None
        };

        info!("Database ready at {location}");

        Ok(Self {
            options,
            location,
            keepalive: Mutex::new(keepalive),
        })
    }

    /// Acquires a fresh connection for one call.
    async fn acquire(&self) -> Result<SqliteConnection> {
        connect_with(&self.options, &self.location).await
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.execute_with_params(sql, &[]).await
    }

    async fn execute_with_params(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let sql = validate_sql(sql)?;
        let mut conn = self.acquire().await?;
        let result = query::execute_with(&mut conn, sql, params).await;
        release(conn).await;

        if let Err(e) = &result {
            debug!("Statement failed: {e}");
        }
        result
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.acquire().await?;
        let result = conn.ping().await.map_err(SandboxError::from);
        release(conn).await;
        result
    }

    async fn close(&self) -> Result<()> {
        if let Some(conn) = self.keepalive.lock().await.take() {
            conn.close()
                .await
                .map_err(|e| SandboxError::connection(format!("Failed to close database: {e}")))?;
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

async fn connect_with(options: &SqliteConnectOptions, location: &str) -> Result<SqliteConnection> {
    SqliteConnection::connect_with(options)
        .await
        .map_err(|e| SandboxError::connection(format!("Cannot open {location}: {e}")))
}

/// Closes a connection, logging rather than surfacing close failures.
async fn release(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close connection cleanly: {e}");
    }
}

fn ensure_parent_dirs(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            SandboxError::connection(format!(
                "Failed to create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}
