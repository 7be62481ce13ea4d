//! Database access layer for the sandbox.
//!
//! Provides a trait-based interface for running statements, so the console
//! and the fixture, statistics and health helpers can run against SQLite or
//! against an in-process mock.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use sqlite::SqliteClient;
pub use types::{QueryResult, Row, Value, ROWS_AFFECTED_COLUMN};

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens a database client for the given configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &DatabaseConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::open(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// Every call acquires its own connection and releases it before returning,
/// so concurrent calls never share a connection.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL statement and returns its shaped result.
    ///
    /// Empty or whitespace-only SQL fails with `InvalidInput` before any
    /// connection is acquired.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Executes a SQL statement with positional `?` parameters.
    async fn execute_with_params(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Verifies that a connection can be acquired.
    async fn ping(&self) -> Result<()>;

    /// Releases anything the client holds open.
    async fn close(&self) -> Result<()>;

    /// Human-readable location of the database.
    fn location(&self) -> String;
}
