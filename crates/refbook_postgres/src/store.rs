//! [`PgRefbookStore`] — sqlx-backed implementation of the storage port.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use refbook_core::error::{RefbookError, Result};
use refbook_core::ports::RefbookStore;
use refbook_core::types::{
    ElementEntry, NewRefbook, NewRefbookElement, NewRefbookVersion, Refbook, RefbookElement,
    RefbookSummary, RefbookVersion, VersionSelector,
};

use crate::sqlx_types::{ElementEntryRow, ElementRow, RefbookRow, RefbookSummaryRow, VersionRow};

pub struct PgRefbookStore {
    pool: PgPool,
}

impl PgRefbookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Unique (23505) and foreign-key (23503) violations are integrity
/// refusals, not faults — they carry the database's own message.
fn db_err(err: sqlx::Error) -> RefbookError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.code().as_deref(), Some("23505") | Some("23503")) {
            return RefbookError::Conflict(db.message().to_string());
        }
    }
    RefbookError::Internal(anyhow::Error::new(err))
}

#[async_trait]
impl RefbookStore for PgRefbookStore {
    async fn list_refbooks(&self, as_of: Option<NaiveDate>) -> Result<Vec<RefbookSummary>> {
        let rows = match as_of {
            Some(date) => {
                sqlx::query_as::<_, RefbookSummaryRow>(
                    r#"
                    SELECT DISTINCT r.id, r.code, r.name
                    FROM refbooks r
                    JOIN refbook_versions v ON v.refbook_id = r.id
                    WHERE v.created_date <= $1
                    "#,
                )
                .bind(date)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, RefbookSummaryRow>("SELECT id, code, name FROM refbooks")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn resolve_version(
        &self,
        refbook_id: i64,
        selector: &VersionSelector,
    ) -> Result<Option<RefbookVersion>> {
        let row = match selector {
            VersionSelector::Label(label) => {
                sqlx::query_as::<_, VersionRow>(
                    r#"
                    SELECT id, refbook_id, version, created_date
                    FROM refbook_versions
                    WHERE refbook_id = $1 AND version = $2
                    "#,
                )
                .bind(refbook_id)
                .bind(label)
                .fetch_optional(&self.pool)
                .await
            }
            VersionSelector::LatestAsOf(date) => {
                // Single aggregate query; the unique (refbook_id,
                // created_date) constraint guarantees at most one row at
                // the max date.
                sqlx::query_as::<_, VersionRow>(
                    r#"
                    SELECT id, refbook_id, version, created_date
                    FROM refbook_versions
                    WHERE refbook_id = $1
                      AND created_date = (
                          SELECT MAX(created_date)
                          FROM refbook_versions
                          WHERE refbook_id = $1 AND created_date <= $2
                      )
                    "#,
                )
                .bind(refbook_id)
                .bind(date)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;
        Ok(row.map(Into::into))
    }

    async fn list_elements(&self, version_id: i64) -> Result<Vec<ElementEntry>> {
        let rows = sqlx::query_as::<_, ElementEntryRow>(
            "SELECT DISTINCT code, value FROM refbook_elements WHERE version_id = $1",
        )
        .bind(version_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn element_exists(&self, version_id: i64, code: &str, value: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM refbook_elements
                WHERE version_id = $1 AND code = $2 AND value = $3
            )
            "#,
        )
        .bind(version_id)
        .bind(code)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(exists)
    }

    async fn insert_refbook(&self, new: NewRefbook) -> Result<Refbook> {
        let row = sqlx::query_as::<_, RefbookRow>(
            r#"
            INSERT INTO refbooks (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, description
            "#,
        )
        .bind(&new.code)
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn insert_version(&self, new: NewRefbookVersion) -> Result<RefbookVersion> {
        let row = sqlx::query_as::<_, VersionRow>(
            r#"
            INSERT INTO refbook_versions (refbook_id, version, created_date)
            VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
            RETURNING id, refbook_id, version, created_date
            "#,
        )
        .bind(new.refbook_id)
        .bind(&new.version)
        .bind(new.created_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn insert_element(&self, new: NewRefbookElement) -> Result<RefbookElement> {
        let row = sqlx::query_as::<_, ElementRow>(
            r#"
            INSERT INTO refbook_elements (version_id, code, value)
            VALUES ($1, $2, $3)
            RETURNING id, version_id, code, value
            "#,
        )
        .bind(new.version_id)
        .bind(&new.code)
        .bind(&new.value)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn delete_refbook(&self, refbook_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM refbooks WHERE id = $1")
            .bind(refbook_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_version(&self, version_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM refbook_versions WHERE id = $1")
            .bind(version_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_element(&self, element_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM refbook_elements WHERE id = $1")
            .bind(element_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
