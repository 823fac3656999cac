//! Postgres pool for the listings, leads and profiles tables

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Matches the `[database] max_connections` default
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Requests wait at most this long for a free connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect eagerly so a bad URL fails at startup rather than on the first request.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections, "database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    // DATABASE_URL=postgres://... cargo test -p luxehome-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_reaches_listing_tables() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 2).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM properties")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert!(count >= 0);
    }
}
