//! Idempotent schema bootstrap, run once at server startup.
//!
//! Column widths match the reference data the service carries: codes up to
//! 100 chars, names/values up to 300, version labels up to 50. All
//! parent→child relations are `ON DELETE RESTRICT` (protected delete).

use sqlx::PgPool;
use tracing::info;

use refbook_core::error::Result;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS refbooks (
        id BIGSERIAL PRIMARY KEY,
        code VARCHAR(100) NOT NULL UNIQUE,
        name VARCHAR(300) NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS refbook_versions (
        id BIGSERIAL PRIMARY KEY,
        refbook_id BIGINT NOT NULL REFERENCES refbooks(id) ON DELETE RESTRICT,
        version VARCHAR(50) NOT NULL,
        created_date DATE NOT NULL DEFAULT CURRENT_DATE,

        UNIQUE (refbook_id, version),
        UNIQUE (refbook_id, created_date)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_refbook_versions_created_date
    ON refbook_versions(created_date)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS refbook_elements (
        id BIGSERIAL PRIMARY KEY,
        version_id BIGINT NOT NULL REFERENCES refbook_versions(id) ON DELETE RESTRICT,
        code VARCHAR(100) NOT NULL,
        value VARCHAR(300) NOT NULL,

        UNIQUE (version_id, code)
    )
    "#,
];

/// Create the refbook tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in DDL {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(anyhow::Error::new)?;
    }
    info!("refbook schema ready");
    Ok(())
}
