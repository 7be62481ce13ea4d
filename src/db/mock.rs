//! Mock database clients for testing.
//!
//! Provide in-process stand-ins for callers of [`DatabaseClient`] that should
//! be exercised without a database file.

use super::{DatabaseClient, QueryResult, Value};
use crate::error::{Result, SandboxError};
use crate::query::{classify, validate_sql, StatementKind};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined results.
///
/// Reads return the canned result registered for their exact SQL, or a
/// single `result` cell echoing the statement. Mutations report one
/// affected row. Every statement is recorded.
#[derive(Default)]
pub struct MockDatabaseClient {
    canned: HashMap<String, QueryResult>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with no canned results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result returned for `sql`.
    pub fn with_result(
        mut self,
        sql: impl Into<String>,
        columns: Vec<&str>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        let columns = columns.into_iter().map(String::from).collect();
        self.canned.insert(
            sql.into(),
            QueryResult::read(columns, rows, Duration::from_millis(1)),
        );
        self
    }

    /// Returns every statement executed so far.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.execute_with_params(sql, &[]).await
    }

    async fn execute_with_params(&self, sql: &str, _params: &[Value]) -> Result<QueryResult> {
        let sql = validate_sql(sql)?;
        if let Ok(mut log) = self.executed.lock() {
            log.push(sql.to_string());
        }

        if let Some(result) = self.canned.get(sql) {
            return Ok(result.clone());
        }

        match classify(sql) {
            StatementKind::Read => Ok(QueryResult::read(
                vec!["result".to_string()],
                vec![vec![Value::String(format!("Mock result for: {sql}"))]],
                Duration::from_millis(1),
            )),
            StatementKind::Mutation => Ok(QueryResult::mutation(1, Duration::from_millis(1))),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn location(&self) -> String {
        "mock database".to_string()
    }
}

/// A client whose database is unreachable: every call fails with a
/// connection error.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client reporting `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.execute_with_params(sql, &[]).await
    }

    async fn execute_with_params(&self, sql: &str, _params: &[Value]) -> Result<QueryResult> {
        validate_sql(sql)?;
        Err(SandboxError::connection(self.message.clone()))
    }

    async fn ping(&self) -> Result<()> {
        Err(SandboxError::connection(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn location(&self) -> String {
        "unreachable database".to_string()
    }
}
