//! Summary statistics over the sample tables.

use crate::db::{DatabaseClient, QueryResult, Value};
use crate::error::{Result, SandboxError};
use serde::Serialize;

/// Row counts and averages for the practice schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub total_students: i64,
    pub total_books: i64,
    pub total_orders: i64,
    pub average_student_age: f64,
    pub average_book_price: f64,
    pub books_by_genre: Vec<GenreCount>,
}

/// Number of books in one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

const GENRE_COUNTS: &str = "SELECT genre, COUNT(*) AS count FROM books \
                            GROUP BY genre ORDER BY count DESC, genre";

/// Gathers statistics through the regular execution path.
pub async fn collect(client: &dyn DatabaseClient) -> Result<DatabaseStats> {
    let total_students = count(client, "SELECT COUNT(*) FROM students").await?;
    let total_books = count(client, "SELECT COUNT(*) FROM books").await?;
    let total_orders = count(client, "SELECT COUNT(*) FROM orders").await?;
    let average_student_age = average(client, "SELECT AVG(age) FROM students").await?;
    let average_book_price = average(client, "SELECT AVG(price) FROM books").await?;

    let books_by_genre = client
        .execute_query(GENRE_COUNTS)
        .await?
        .into_rows()
        .into_iter()
        .map(|row| match row.as_slice() {
            [genre, Value::Int(count)] => Ok(GenreCount {
                genre: genre.as_str().unwrap_or("NULL").to_string(),
                count: *count,
            }),
            other => Err(SandboxError::internal(format!(
                "Unexpected genre count row: {other:?}"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DatabaseStats {
        total_students,
        total_books,
        total_orders,
        average_student_age: round2(average_student_age),
        average_book_price: round2(average_book_price),
        books_by_genre,
    })
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

async fn count(client: &dyn DatabaseClient, sql: &str) -> Result<i64> {
    let result = client.execute_query(sql).await?;
    scalar(&result, sql)?
        .as_i64()
        .ok_or_else(|| SandboxError::internal(format!("Expected an integer from: {sql}")))
}

/// Averages over empty tables are NULL and report as zero.
async fn average(client: &dyn DatabaseClient, sql: &str) -> Result<f64> {
    let result = client.execute_query(sql).await?;
    match scalar(&result, sql)? {
        Value::Null => Ok(0.0),
        value => value
            .as_f64()
            .ok_or_else(|| SandboxError::internal(format!("Expected a number from: {sql}"))),
    }
}

fn scalar<'a>(result: &'a QueryResult, sql: &str) -> Result<&'a Value> {
    result
        .scalar()
        .ok_or_else(|| SandboxError::internal(format!("No value returned by: {sql}")))
}
