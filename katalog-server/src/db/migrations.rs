//! Bootstrap DDL for the catalog tables
//!
//! Idempotent CREATE TABLE IF NOT EXISTS statements, run at startup.
//! The UNIQUE and REFERENCES constraints back up the repositories'
//! pre-checks; a violation racing past a pre-check is translated in the
//! repos instead of surfacing as an internal error.

use sqlx::PgPool;

/// Run all catalog migrations.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running catalog migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS category (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            price DOUBLE PRECISION NOT NULL,
            currency TEXT NOT NULL DEFAULT 'Rp',
            quantity INTEGER NOT NULL DEFAULT 0,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            category_id INTEGER NOT NULL REFERENCES category(id),
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id)")
        .execute(pool)
        .await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}
