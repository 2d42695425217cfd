use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Opens the process-wide pool shared by every handler.
pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Applies `migrations/`. Tables may already exist out-of-band, so a failure
/// is reported but does not stop startup.
pub async fn migrate(db: &PgPool) {
    match sqlx::migrate!("./migrations").run(db).await {
        Ok(()) => tracing::debug!("migrations applied"),
        Err(e) => tracing::warn!(error = %e, "migration failed; continuing"),
    }
}

/// Pool against `DATABASE_URL` with migrations applied, or `None` when the
/// variable is unset so store tests skip without a database.
#[cfg(test)]
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("apply migrations");
    Some(db)
}

/// An owner id no other test run uses, so tests can share one database.
#[cfg(test)]
pub fn unique_user_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    static NEXT: AtomicI64 = AtomicI64::new(0);
    let base = time::OffsetDateTime::now_utc().unix_timestamp_nanos() as i64 / 1_000;
    base.saturating_mul(100) + NEXT.fetch_add(1, Ordering::Relaxed) % 100
}
