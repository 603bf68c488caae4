#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the schema applied. A single pooled
/// connection keeps the database alive for the lifetime of the test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    models::db::connect_and_migrate(&cfg).await
}
