//! Schema bootstrap for a fresh database
//!
//! The hosted backend owns these tables in production; `luxehome migrate`
//! creates them when pointing at a local Postgres. Every statement is
//! idempotent.

use sqlx::PgPool;

pub const STATEMENTS: &[(&str, &str)] = &[
    (
        "profiles",
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY,
            full_name TEXT,
            job_title TEXT,
            email TEXT,
            phone TEXT,
            bio TEXT,
            avatar_url TEXT,
            updated_at TIMESTAMPTZ
        )
        "#,
    ),
    (
        "properties",
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            description TEXT,
            price DOUBLE PRECISION NOT NULL DEFAULT 0,
            address TEXT,
            beds INTEGER,
            baths INTEGER,
            sqft INTEGER,
            image TEXT,
            status TEXT NOT NULL DEFAULT 'Draft',
            type TEXT,
            listing_type TEXT,
            amenities JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            user_id UUID
        )
        "#,
    ),
    (
        "leads",
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'New',
            score INTEGER,
            property_id UUID REFERENCES properties(id) ON DELETE SET NULL,
            agent_id UUID,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "properties_status_created_idx",
        "CREATE INDEX IF NOT EXISTS properties_status_created_idx ON properties (status, created_at DESC)",
    ),
    (
        "properties_user_idx",
        "CREATE INDEX IF NOT EXISTS properties_user_idx ON properties (user_id)",
    ),
    (
        "properties_amenities_idx",
        "CREATE INDEX IF NOT EXISTS properties_amenities_idx ON properties USING GIN (amenities)",
    ),
    (
        "leads_agent_idx",
        "CREATE INDEX IF NOT EXISTS leads_agent_idx ON leads (agent_id, created_at DESC)",
    ),
];

/// Create tables and indexes if missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running LuxeHome migrations...");

    for (name, sql) in STATEMENTS {
        sqlx::query(sql).execute(pool).await?;
        tracing::debug!(object = name, "ensured");
    }

    tracing::info!("Migrations complete");
    Ok(())
}
