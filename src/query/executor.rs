//! Statement execution.
//!
//! Runs one statement on a caller-supplied connection and assembles a
//! [`QueryResult`]. Reads are prepared, their metadata is read once, and the
//! row cursor is handed to the shaper; mutations go through the affected-rows
//! API and are reported as a single synthetic `rows_affected` cell.

use std::time::Instant;

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection};
use sqlx::{Executor, Statement};
use tracing::debug;

use super::classify::{classify, StatementKind};
use super::shaper::shape;
use crate::db::{QueryResult, Value};
use crate::error::Result;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Executes `sql` on `conn`.
///
/// Execution time covers submission through full consumption of the result;
/// classification happens before the clock starts. The connection is
/// borrowed, never closed here.
pub async fn execute(conn: &mut SqliteConnection, sql: &str) -> Result<QueryResult> {
    execute_with(conn, sql, &[]).await
}

/// Executes `sql` with positional `?` parameters bound from `params`.
pub async fn execute_with(
    conn: &mut SqliteConnection,
    sql: &str,
    params: &[Value],
) -> Result<QueryResult> {
    let kind = classify(sql);
    let start = Instant::now();

    let result = match kind {
        StatementKind::Read => {
            let statement = (&mut *conn).prepare(sql).await?;
            let mut cursor = bind_all(statement.query(), params).fetch(&mut *conn);
            let (columns, rows) = shape(statement.columns(), &mut cursor).await?;
            drop(cursor);
            QueryResult::read(columns, rows, start.elapsed())
        }
        StatementKind::Mutation => {
            let outcome = bind_all(sqlx::query(sql), params)
                .execute(&mut *conn)
                .await?;
            QueryResult::mutation(outcome.rows_affected(), start.elapsed())
        }
    };

    debug!(
        kind = kind.as_str(),
        rows = result.total_rows(),
        elapsed_ms = result.execution_time_ms(),
        "Statement executed"
    );

    Ok(result)
}

fn bind_all<'q>(mut query: SqliteQuery<'q>, params: &[Value]) -> SqliteQuery<'q> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Bool(b) => query.bind(*b),
            Value::Int(i) => query.bind(*i),
            Value::Float(f) => query.bind(*f),
            Value::String(s) => query.bind(s.clone()),
        };
    }
    query
}
