//! Storage port for refbook data.
//! Implemented by `refbook_postgres` — core logic depends only on this trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{
    ElementEntry, NewRefbook, NewRefbookElement, NewRefbookVersion, Refbook, RefbookElement,
    RefbookSummary, RefbookVersion, VersionSelector,
};

/// Storage operations for refbooks, versions and elements.
///
/// Read methods back the query service. Write methods exist for data
/// loading, admin tooling and tests — there are no write endpoints on the
/// HTTP surface. Implementations must enforce the uniqueness and
/// protected-delete invariants, surfacing violations as
/// [`crate::error::RefbookError::Conflict`].
#[async_trait]
pub trait RefbookStore: Send + Sync {
    // ── Reads ──

    /// List refbooks, optionally restricted to those having at least one
    /// version effective on or before `as_of`.
    async fn list_refbooks(&self, as_of: Option<NaiveDate>) -> Result<Vec<RefbookSummary>>;

    /// Resolve the snapshot a selector pins for `refbook_id`.
    ///
    /// Unknown refbook, unknown label, or no version effective by the
    /// reference date all yield `None` — never an error.
    async fn resolve_version(
        &self,
        refbook_id: i64,
        selector: &VersionSelector,
    ) -> Result<Option<RefbookVersion>>;

    /// Distinct `{code, value}` pairs of one version snapshot.
    async fn list_elements(&self, version_id: i64) -> Result<Vec<ElementEntry>>;

    /// Exact-match (case-sensitive) existence of a code/value pair in one
    /// snapshot.
    async fn element_exists(&self, version_id: i64, code: &str, value: &str) -> Result<bool>;

    // ── Writes (data loading and tests) ──

    async fn insert_refbook(&self, new: NewRefbook) -> Result<Refbook>;
    async fn insert_version(&self, new: NewRefbookVersion) -> Result<RefbookVersion>;
    async fn insert_element(&self, new: NewRefbookElement) -> Result<RefbookElement>;

    /// Refused with `Conflict` while versions reference the refbook.
    async fn delete_refbook(&self, refbook_id: i64) -> Result<()>;

    /// Refused with `Conflict` while elements reference the version.
    async fn delete_version(&self, version_id: i64) -> Result<()>;

    async fn delete_element(&self, element_id: i64) -> Result<()>;
}
