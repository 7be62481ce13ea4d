//! Statement execution against the seeded sample tables.

use super::common::seeded_client;
use pretty_assertions::assert_eq;
use regex::Regex;
use sql_sandbox::catalog;
use sql_sandbox::db::{DatabaseClient, Value, ROWS_AFFECTED_COLUMN};
use sql_sandbox::error::SandboxError;

#[tokio::test]
async fn test_select_students_in_grade_seven() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT name, age FROM students WHERE grade = 7")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["name", "age"]);
    assert_eq!(
        result.rows(),
        &[vec![Value::from("Charlie Brown"), Value::Int(12)]]
    );
    assert_eq!(result.total_rows(), 1);
}

#[tokio::test]
async fn test_insert_reports_rows_affected() {
    let client = seeded_client().await;

    let result = client
        .execute_query("INSERT INTO students (name, age, grade) VALUES ('X', 10, 5)")
        .await
        .unwrap();

    assert_eq!(result.columns(), [ROWS_AFFECTED_COLUMN]);
    assert_eq!(result.rows(), &[vec![Value::Int(1)]]);
    assert_eq!(result.total_rows(), 1);
}

#[tokio::test]
async fn test_delete_reports_rows_affected() {
    let client = seeded_client().await;

    let result = client
        .execute_query("DELETE FROM orders WHERE student_id = 1")
        .await
        .unwrap();

    assert_eq!(result.rows(), &[vec![Value::Int(2)]]);
    assert_eq!(result.total_rows(), 2);
}

#[tokio::test]
async fn test_unknown_table_is_execution_error() {
    let client = seeded_client().await;

    let err = client
        .execute_query("SELECT * FROM nonexistent_table")
        .await
        .unwrap_err();

    match err {
        SandboxError::Execution(msg) => {
            assert!(msg.contains("no such table: nonexistent_table"), "{msg}")
        }
        other => panic!("expected execution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_sql_is_invalid_input() {
    let client = seeded_client().await;

    for sql in ["", "   ", "\n\t"] {
        let err = client.execute_query(sql).await.unwrap_err();
        assert!(matches!(err, SandboxError::InvalidInput(_)), "{sql:?}");
    }
}

#[tokio::test]
async fn test_zero_row_read_keeps_columns() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT id, name, email FROM students WHERE age > 100")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["id", "name", "email"]);
    assert!(result.is_empty());
    assert_eq!(result.total_rows(), 0);
}

#[tokio::test]
async fn test_every_row_matches_column_count() {
    let client = seeded_client().await;

    let result = client
        .execute_query(
            "SELECT s.name, b.title, o.quantity, o.order_date \
             FROM orders o \
             JOIN students s ON s.id = o.student_id \
             JOIN books b ON b.id = o.book_id",
        )
        .await
        .unwrap();

    assert_eq!(result.total_rows(), 14);
    assert!(result.rows().iter().all(|row| row.len() == 4));
}

#[tokio::test]
async fn test_date_columns_are_normalized() {
    let client = seeded_client().await;
    let date = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    let result = client
        .execute_query("SELECT enrollment_date FROM students")
        .await
        .unwrap();

    assert_eq!(result.total_rows(), 8);
    for row in result.rows() {
        let value = row[0].as_str().expect("date shaped as text");
        assert!(date.is_match(value), "{value}");
    }
}

#[tokio::test]
async fn test_datetime_text_in_date_column_is_truncated() {
    let client = seeded_client().await;

    client
        .execute_query("UPDATE students SET enrollment_date = '2023-09-01 08:30:00' WHERE id = 1")
        .await
        .unwrap();
    let result = client
        .execute_query("SELECT enrollment_date FROM students WHERE id = 1")
        .await
        .unwrap();

    assert_eq!(result.scalar(), Some(&Value::from("2023-09-01")));
}

#[tokio::test]
async fn test_boolean_columns_decode_as_bool() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT available FROM books WHERE id = 1")
        .await
        .unwrap();

    assert_eq!(result.scalar(), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn test_decimal_column_is_float_in_every_row() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT price FROM books ORDER BY id")
        .await
        .unwrap();

    assert_eq!(result.total_rows(), 8);
    assert!(
        result.rows().iter().all(|row| matches!(row[0], Value::Float(_))),
        "{:?}",
        result.rows()
    );
    assert_eq!(result.rows()[4], vec![Value::Float(22.0)]);
}

#[tokio::test]
async fn test_aggregates_are_not_rounded() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT AVG(age) FROM students")
        .await
        .unwrap();

    assert_eq!(result.scalar(), Some(&Value::Float(14.375)));
}

#[tokio::test]
async fn test_duplicate_column_names_preserved() {
    let client = seeded_client().await;

    let result = client
        .execute_query("SELECT s.id, b.id FROM students s JOIN books b ON b.id = s.id WHERE s.id = 2")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["id", "id"]);
    assert_eq!(result.rows(), &[vec![Value::Int(2), Value::Int(2)]]);
}

#[tokio::test]
async fn test_repeated_read_is_identical() {
    let client = seeded_client().await;
    let sql = "SELECT * FROM books ORDER BY id";

    let first = client.execute_query(sql).await.unwrap();
    let second = client.execute_query(sql).await.unwrap();

    assert_eq!(first.columns(), second.columns());
    assert_eq!(first.rows(), second.rows());
}

#[tokio::test]
async fn test_lowercase_select_is_read() {
    let client = seeded_client().await;

    let result = client
        .execute_query("  select count(*) as n from books;")
        .await
        .unwrap();

    assert_eq!(result.columns(), ["n"]);
    assert_eq!(result.scalar(), Some(&Value::Int(8)));
}

#[tokio::test]
async fn test_with_clause_takes_mutation_path() {
    let client = seeded_client().await;

    let result = client
        .execute_query("WITH young AS (SELECT * FROM students WHERE age < 14) SELECT name FROM young")
        .await
        .unwrap();

    assert!(result.is_mutation());
    assert_eq!(result.total_rows(), 0);
}

#[tokio::test]
async fn test_every_catalog_query_runs() {
    let client = seeded_client().await;

    for query in catalog::sample_queries() {
        let result = client.execute_query(query.sql).await;
        assert!(result.is_ok(), "{}: {:?}", query.title, result.err());
    }
}

#[tokio::test]
async fn test_concurrent_reads_are_independent() {
    let client = std::sync::Arc::new(seeded_client().await);

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .execute_query("SELECT COUNT(*) FROM students")
                    .await
                    .map(|r| r.scalar().cloned())
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), Some(Value::Int(8)));
    }
}
