//! sqlx row types mirroring the core domain structs.
//!
//! Kept separate so `refbook_core` stays free of sqlx derives.

use chrono::NaiveDate;
use sqlx::FromRow;

use refbook_core::types::{ElementEntry, Refbook, RefbookElement, RefbookSummary, RefbookVersion};

#[derive(Debug, FromRow)]
pub(crate) struct RefbookRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<RefbookRow> for Refbook {
    fn from(row: RefbookRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RefbookSummaryRow {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl From<RefbookSummaryRow> for RefbookSummary {
    fn from(row: RefbookSummaryRow) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct VersionRow {
    pub id: i64,
    pub refbook_id: i64,
    pub version: String,
    pub created_date: NaiveDate,
}

impl From<VersionRow> for RefbookVersion {
    fn from(row: VersionRow) -> Self {
        Self {
            id: row.id,
            refbook_id: row.refbook_id,
            version: row.version,
            created_date: row.created_date,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ElementRow {
    pub id: i64,
    pub version_id: i64,
    pub code: String,
    pub value: String,
}

impl From<ElementRow> for RefbookElement {
    fn from(row: ElementRow) -> Self {
        Self {
            id: row.id,
            version_id: row.version_id,
            code: row.code,
            value: row.value,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ElementEntryRow {
    pub code: String,
    pub value: String,
}

impl From<ElementEntryRow> for ElementEntry {
    fn from(row: ElementEntryRow) -> Self {
        Self {
            code: row.code,
            value: row.value,
        }
    }
}
