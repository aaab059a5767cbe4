//! In-memory [`RefbookStore`] for tests, POC use and data-loading dry runs.
//!
//! Enforces the same integrity rules the SQL schema does:
//! - refbook `code` globally unique
//! - `(refbook_id, version)` and `(refbook_id, created_date)` unique
//! - `(version_id, code)` unique
//! - parents cannot be deleted while children reference them

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::error::{RefbookError, Result};
use crate::ports::RefbookStore;
use crate::types::{
    ElementEntry, NewRefbook, NewRefbookElement, NewRefbookVersion, Refbook, RefbookElement,
    RefbookSummary, RefbookVersion, VersionSelector,
};

#[derive(Default)]
struct Inner {
    refbooks: BTreeMap<i64, Refbook>,
    versions: BTreeMap<i64, RefbookVersion>,
    elements: BTreeMap<i64, RefbookElement>,
    next_refbook_id: i64,
    next_version_id: i64,
    next_element_id: i64,
}

#[derive(Default)]
pub struct MemoryRefbookStore {
    inner: RwLock<Inner>,
}

impl MemoryRefbookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefbookStore for MemoryRefbookStore {
    async fn list_refbooks(&self, as_of: Option<NaiveDate>) -> Result<Vec<RefbookSummary>> {
        let inner = self.inner.read().map_err(|e| anyhow!("lock: {e}"))?;
        let rows = inner
            .refbooks
            .values()
            .filter(|r| match as_of {
                Some(date) => inner
                    .versions
                    .values()
                    .any(|v| v.refbook_id == r.id && v.created_date <= date),
                None => true,
            })
            .map(|r| RefbookSummary {
                id: r.id,
                code: r.code.clone(),
                name: r.name.clone(),
            })
            .collect();
        Ok(rows)
    }

    async fn resolve_version(
        &self,
        refbook_id: i64,
        selector: &VersionSelector,
    ) -> Result<Option<RefbookVersion>> {
        let inner = self.inner.read().map_err(|e| anyhow!("lock: {e}"))?;
        let resolved = match selector {
            VersionSelector::Label(label) => inner
                .versions
                .values()
                .find(|v| v.refbook_id == refbook_id && v.version == *label),
            VersionSelector::LatestAsOf(date) => inner
                .versions
                .values()
                .filter(|v| v.refbook_id == refbook_id && v.created_date <= *date)
                .max_by_key(|v| v.created_date),
        };
        Ok(resolved.cloned())
    }

    async fn list_elements(&self, version_id: i64) -> Result<Vec<ElementEntry>> {
        let inner = self.inner.read().map_err(|e| anyhow!("lock: {e}"))?;
        let rows = inner
            .elements
            .values()
            .filter(|e| e.version_id == version_id)
            .map(|e| ElementEntry {
                code: e.code.clone(),
                value: e.value.clone(),
            })
            .collect();
        Ok(rows)
    }

    async fn element_exists(&self, version_id: i64, code: &str, value: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(|e| anyhow!("lock: {e}"))?;
        Ok(inner
            .elements
            .values()
            .any(|e| e.version_id == version_id && e.code == code && e.value == value))
    }

    async fn insert_refbook(&self, new: NewRefbook) -> Result<Refbook> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        if inner.refbooks.values().any(|r| r.code == new.code) {
            return Err(RefbookError::Conflict(format!(
                "refbook code '{}' already exists",
                new.code
            )));
        }
        inner.next_refbook_id += 1;
        let refbook = Refbook {
            id: inner.next_refbook_id,
            code: new.code,
            name: new.name,
            description: new.description,
        };
        inner.refbooks.insert(refbook.id, refbook.clone());
        Ok(refbook)
    }

    async fn insert_version(&self, new: NewRefbookVersion) -> Result<RefbookVersion> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        if !inner.refbooks.contains_key(&new.refbook_id) {
            return Err(RefbookError::Conflict(format!(
                "unknown refbook id {}",
                new.refbook_id
            )));
        }
        let created_date = new
            .created_date
            .unwrap_or_else(|| Local::now().date_naive());
        for v in inner.versions.values().filter(|v| v.refbook_id == new.refbook_id) {
            if v.version == new.version {
                return Err(RefbookError::Conflict(format!(
                    "version '{}' already exists for refbook {}",
                    new.version, new.refbook_id
                )));
            }
            if v.created_date == created_date {
                return Err(RefbookError::Conflict(format!(
                    "a version of refbook {} is already effective from {created_date}",
                    new.refbook_id
                )));
            }
        }
        inner.next_version_id += 1;
        let version = RefbookVersion {
            id: inner.next_version_id,
            refbook_id: new.refbook_id,
            version: new.version,
            created_date,
        };
        inner.versions.insert(version.id, version.clone());
        Ok(version)
    }

    async fn insert_element(&self, new: NewRefbookElement) -> Result<RefbookElement> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        if !inner.versions.contains_key(&new.version_id) {
            return Err(RefbookError::Conflict(format!(
                "unknown version id {}",
                new.version_id
            )));
        }
        if inner
            .elements
            .values()
            .any(|e| e.version_id == new.version_id && e.code == new.code)
        {
            return Err(RefbookError::Conflict(format!(
                "element code '{}' already exists in version {}",
                new.code, new.version_id
            )));
        }
        inner.next_element_id += 1;
        let element = RefbookElement {
            id: inner.next_element_id,
            version_id: new.version_id,
            code: new.code,
            value: new.value,
        };
        inner.elements.insert(element.id, element.clone());
        Ok(element)
    }

    async fn delete_refbook(&self, refbook_id: i64) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        if inner.versions.values().any(|v| v.refbook_id == refbook_id) {
            return Err(RefbookError::Conflict(format!(
                "refbook {refbook_id} still has versions"
            )));
        }
        inner.refbooks.remove(&refbook_id);
        Ok(())
    }

    async fn delete_version(&self, version_id: i64) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        if inner.elements.values().any(|e| e.version_id == version_id) {
            return Err(RefbookError::Conflict(format!(
                "version {version_id} still has elements"
            )));
        }
        inner.versions.remove(&version_id);
        Ok(())
    }

    async fn delete_element(&self, element_id: i64) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| anyhow!("lock: {e}"))?;
        inner.elements.remove(&element_id);
        Ok(())
    }
}
