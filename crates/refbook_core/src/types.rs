//! Domain types: refbooks, their dated version snapshots, and the
//! code→value elements each snapshot holds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named reference table identified by a globally unique code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refbook {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// A dated snapshot of a refbook's contents.
///
/// `created_date` is the effective start date of the snapshot. Within one
/// refbook both the version label and the effective date are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefbookVersion {
    pub id: i64,
    pub refbook_id: i64,
    pub version: String,
    pub created_date: NaiveDate,
}

/// A single code→value entry belonging to exactly one version snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefbookElement {
    pub id: i64,
    pub version_id: i64,
    pub code: String,
    pub value: String,
}

/// Listing projection of a refbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefbookSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Element projection returned by element queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    pub code: String,
    pub value: String,
}

/// Input for creating a refbook.
#[derive(Debug, Clone)]
pub struct NewRefbook {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a version snapshot.
#[derive(Debug, Clone)]
pub struct NewRefbookVersion {
    pub refbook_id: i64,
    pub version: String,
    /// Effective date; `None` means "today" at insertion time.
    pub created_date: Option<NaiveDate>,
}

/// Input for creating an element within a snapshot.
#[derive(Debug, Clone)]
pub struct NewRefbookElement {
    pub version_id: i64,
    pub code: String,
    pub value: String,
}

/// How to pin a refbook's snapshot for element queries.
///
/// The reference date is always explicit — handlers pass the server
/// clock's date, tests pass fixed dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Exact version label.
    Label(String),
    /// Latest version whose effective date is on or before the given date.
    LatestAsOf(NaiveDate),
}
