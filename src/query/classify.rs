//! Statement classification.
//!
//! Decides whether a statement is executed as a read (returning a result set)
//! or as a mutation (returning an affected-row count). This is a textual
//! heuristic on the statement prefix, not a SQL grammar: anything that does not
//! literally begin with `SELECT` takes the mutation path, including
//! `WITH ... SELECT`, `PRAGMA`, `EXPLAIN` and multi-statement scripts. Such
//! statements run through the affected-rows API and report what the database
//! counts as changed rows, usually zero.

use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};

/// The two execution paths a statement can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// Produces a result set that is shaped into columns and rows.
    Read,
    /// Reports an affected-row count.
    Mutation,
}

impl StatementKind {
    /// Returns the kind as a lowercase label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Mutation => "mutation",
        }
    }
}

/// Classifies a statement by its leading keyword.
pub fn classify(sql: &str) -> StatementKind {
    if sql.trim().to_uppercase().starts_with("SELECT") {
        StatementKind::Read
    } else {
        StatementKind::Mutation
    }
}

/// Rejects empty and whitespace-only input, returning the trimmed statement.
pub fn validate_sql(sql: &str) -> Result<&str> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(SandboxError::invalid_input("SQL query is required"));
    }
    Ok(trimmed)
}
