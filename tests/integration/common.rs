//! Shared helpers for integration tests.

use sql_sandbox::config::DatabaseConfig;
use sql_sandbox::db::SqliteClient;
use sql_sandbox::seed;

/// An in-memory client with the sample tables loaded.
pub async fn seeded_client() -> SqliteClient {
    let client = SqliteClient::open(&DatabaseConfig::in_memory())
        .await
        .expect("open in-memory database");
    seed::bootstrap(&client).await.expect("seed sample tables");
    client
}
