//! Boundary validation for raw query parameters.

use chrono::NaiveDate;

use crate::error::{RefbookError, Result};

/// Parse a `YYYY-MM-DD` string, rejecting non-calendar dates.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        RefbookError::InvalidInput(format!("malformed date '{raw}', expected YYYY-MM-DD"))
    })
}

/// Absent and empty-string query parameters are treated alike.
pub fn non_empty(param: Option<&str>) -> Option<&str> {
    param.filter(|v| !v.is_empty())
}

/// Require a non-empty query parameter.
pub fn require_param<'a>(param: Option<&'a str>, name: &str) -> Result<&'a str> {
    non_empty(param)
        .ok_or_else(|| RefbookError::InvalidInput(format!("missing required parameter '{name}'")))
}
