//! Query result types for the sandbox.
//!
//! Defines the structures used to represent statement results handed to the
//! console printer and to JSON serializers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Column name reported for mutation statements.
pub const ROWS_AFFECTED_COLUMN: &str = "rows_affected";

/// The uniform result of executing one SQL statement.
///
/// Built once per execution and never modified afterwards; every row holds
/// exactly `columns().len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
    total_rows: u64,
    #[serde(rename = "executionTimeMs", with = "duration_ms")]
    execution_time: Duration,
}

impl QueryResult {
    /// Builds the result of a read statement from shaped columns and rows.
    pub(crate) fn read(columns: Vec<String>, rows: Vec<Row>, execution_time: Duration) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        let total_rows = rows.len() as u64;
        Self {
            columns,
            rows,
            total_rows,
            execution_time,
        }
    }

    /// Builds the synthetic single-cell result of a mutation statement.
    pub(crate) fn mutation(rows_affected: u64, execution_time: Duration) -> Self {
        Self {
            columns: vec![ROWS_AFFECTED_COLUMN.to_string()],
            rows: vec![vec![Value::from(rows_affected)]],
            total_rows: rows_affected,
            execution_time,
        }
    }

    /// Column names in result-set order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in database order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows returned (reads) or rows affected (mutations).
    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// Wall-clock time spent executing the statement.
    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Execution time in whole milliseconds.
    pub fn execution_time_ms(&self) -> u64 {
        self.execution_time.as_millis() as u64
    }

    /// Returns true if this is the synthetic result of a mutation.
    pub fn is_mutation(&self) -> bool {
        self.columns.len() == 1 && self.columns[0] == ROWS_AFFECTED_COLUMN && self.rows.len() == 1
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first value of the first row, if any.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Consumes the result, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// A single cell value.
///
/// Serializes as a bare JSON scalar so generic serializers need no knowledge
/// of the variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text value. Dates are normalized to `YYYY-MM-DD` text.
    String(String),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert the value to a string representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

/// Serde support for Duration as whole milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
