use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

// Build a small PostgreSQL pool for the service.
pub async fn connect_pool(database_url: &str, ssl_mode: PgSslMode) -> Result<PgPool, sqlx::Error> {
    let options = database_url.parse::<PgConnectOptions>()?.ssl_mode(ssl_mode);

    PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

// Run database migrations for the service.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
    MIGRATOR.run(pool).await
}
