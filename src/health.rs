//! Connectivity check.

use crate::catalog::{self, NamedQuery};
use crate::db::DatabaseClient;
use serde::Serialize;
use tracing::warn;

/// Message reported when the database is reachable.
pub const HEALTHY_MESSAGE: &str = "Green means go!";

/// Result of probing the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub connected: bool,
    pub message: String,
    pub sample_queries: Vec<NamedQuery>,
    pub table_names: Vec<&'static str>,
}

/// Probes the database. Failures are reported in the result, never raised.
pub async fn check(client: &dyn DatabaseClient) -> HealthReport {
    match client.ping().await {
        Ok(()) => HealthReport {
            connected: true,
            message: HEALTHY_MESSAGE.to_string(),
            sample_queries: catalog::sample_queries().to_vec(),
            table_names: catalog::table_names().to_vec(),
        },
        Err(e) => {
            warn!("Health check failed: {e}");
            HealthReport {
                connected: false,
                message: e.message().to_string(),
                sample_queries: Vec::new(),
                table_names: Vec::new(),
            }
        }
    }
}
