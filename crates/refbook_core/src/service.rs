//! Read-side query service: version resolution plus the three lookups.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::ports::RefbookStore;
use crate::types::{ElementEntry, RefbookSummary, VersionSelector};

/// Stateless query facade over a [`RefbookStore`].
///
/// Each call resolves from scratch; nothing is carried across requests.
/// Reference dates are explicit arguments — handlers pass the server
/// clock's date, tests pass fixed dates.
#[derive(Clone)]
pub struct RefbookService {
    store: Arc<dyn RefbookStore>,
}

impl RefbookService {
    pub fn new(store: Arc<dyn RefbookStore>) -> Self {
        Self { store }
    }

    fn selector(version: Option<&str>, today: NaiveDate) -> VersionSelector {
        match version {
            Some(label) => VersionSelector::Label(label.to_string()),
            None => VersionSelector::LatestAsOf(today),
        }
    }

    /// List refbooks as `{id, code, name}` projections; with `as_of`, only
    /// those having at least one version effective on or before that date.
    pub async fn list_refbooks(&self, as_of: Option<NaiveDate>) -> Result<Vec<RefbookSummary>> {
        self.store.list_refbooks(as_of).await
    }

    /// Elements of the resolved snapshot; empty when nothing resolves.
    pub async fn list_elements(
        &self,
        refbook_id: i64,
        version: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<ElementEntry>> {
        let selector = Self::selector(version, today);
        match self.store.resolve_version(refbook_id, &selector).await? {
            Some(snapshot) => {
                debug!(refbook_id, version_id = snapshot.id, "resolved snapshot");
                self.store.list_elements(snapshot.id).await
            }
            None => Ok(Vec::new()),
        }
    }

    /// Exact-match existence of `code`/`value` in the resolved snapshot;
    /// `false` when nothing resolves, never an error.
    pub async fn check_element(
        &self,
        refbook_id: i64,
        code: &str,
        value: &str,
        version: Option<&str>,
        today: NaiveDate,
    ) -> Result<bool> {
        let selector = Self::selector(version, today);
        match self.store.resolve_version(refbook_id, &selector).await? {
            Some(snapshot) => self.store.element_exists(snapshot.id, code, value).await,
            None => Ok(false),
        }
    }
}
