use bazaar_adapters::config::PostgresSettings;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Connect to the configured database. Migrations are left to the caller,
/// since the migration set is embedded by the binary.
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = settings.max_connections,
        "Connecting to Postgres"
    );
    get_postgres_pool(settings.url.expose_secret(), settings.max_connections).await
}
