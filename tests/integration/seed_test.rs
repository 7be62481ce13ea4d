//! Sample table bootstrap, statistics and health.

use super::common::seeded_client;
use pretty_assertions::assert_eq;
use sql_sandbox::config::DatabaseConfig;
use sql_sandbox::db::{DatabaseClient, FailingDatabaseClient, SqliteClient, Value};
use sql_sandbox::health::{self, HEALTHY_MESSAGE};
use sql_sandbox::seed::{self, SeedReport};
use sql_sandbox::stats::{self, GenreCount};
use tempfile::tempdir;

#[tokio::test]
async fn test_bootstrap_reports_inserted_rows() {
    let client = SqliteClient::open(&DatabaseConfig::in_memory())
        .await
        .unwrap();

    let report = seed::bootstrap(&client).await.unwrap();

    assert_eq!(
        report,
        SeedReport {
            students: 8,
            books: 8,
            orders: 14,
        }
    );
}

#[tokio::test]
async fn test_bootstrap_resets_existing_data() {
    let dir = tempdir().unwrap();
    let client = SqliteClient::open(&DatabaseConfig::at_path(dir.path().join("school.db")))
        .await
        .unwrap();

    seed::bootstrap(&client).await.unwrap();
    client
        .execute_query("INSERT INTO students (name, age, grade) VALUES ('Extra', 10, 5)")
        .await
        .unwrap();
    seed::bootstrap(&client).await.unwrap();

    let result = client
        .execute_query("SELECT COUNT(*) FROM students")
        .await
        .unwrap();
    assert_eq!(result.scalar(), Some(&Value::Int(8)));
}

#[tokio::test]
async fn test_orders_reference_existing_rows() {
    let client = seeded_client().await;

    let err = client
        .execute_query("INSERT INTO orders (student_id, book_id) VALUES (99, 1)")
        .await
        .unwrap_err();

    assert!(err.message().contains("FOREIGN KEY"), "{err}");
}

#[tokio::test]
async fn test_stats_over_sample_data() {
    let client = seeded_client().await;

    let stats = stats::collect(&client).await.unwrap();

    assert_eq!(stats.total_students, 8);
    assert_eq!(stats.total_books, 8);
    assert_eq!(stats.total_orders, 14);
    assert_eq!(stats.average_student_age, 14.38);
    // The raw average is 19.24625, which sits on a binary rounding edge.
    assert!(
        [19.24, 19.25].contains(&stats.average_book_price),
        "{}",
        stats.average_book_price
    );
    assert_eq!(stats.books_by_genre.len(), 8);
    assert!(stats.books_by_genre.iter().all(|g| g.count == 1));
    assert_eq!(
        stats.books_by_genre[0],
        GenreCount {
            genre: "Art".into(),
            count: 1
        }
    );
}

#[tokio::test]
async fn test_stats_on_empty_tables() {
    let client = seeded_client().await;
    client.execute_query("DELETE FROM orders").await.unwrap();
    client.execute_query("DELETE FROM students").await.unwrap();

    let stats = stats::collect(&client).await.unwrap();

    assert_eq!(stats.total_students, 0);
    assert_eq!(stats.average_student_age, 0.0);
}

#[tokio::test]
async fn test_health_connected() {
    let client = seeded_client().await;

    let report = health::check(&client).await;

    assert!(report.connected);
    assert_eq!(report.message, HEALTHY_MESSAGE);
    assert_eq!(report.table_names, vec!["books", "orders", "students"]);
}

#[tokio::test]
async fn test_health_disconnected() {
    let report = health::check(&FailingDatabaseClient::new("disk I/O error")).await;

    assert!(!report.connected);
    assert_eq!(report.message, "disk I/O error");
}
