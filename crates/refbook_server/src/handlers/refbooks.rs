//! GET handlers for the three refbook lookups.
//!
//! The id path segment is extracted as a raw string and parsed here so a
//! non-integer id flows into the uniform error response instead of the
//! framework's default 400.

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};

use refbook_core::error::RefbookError;
use refbook_core::service::RefbookService;
use refbook_core::types::{ElementEntry, RefbookSummary};
use refbook_core::validation::{non_empty, parse_date, require_param};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ElementsQuery {
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub code: Option<String>,
    pub value: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefbooksResponse {
    pub refbooks: Vec<RefbookSummary>,
}

#[derive(Debug, Serialize)]
pub struct ElementsResponse {
    pub elements: Vec<ElementEntry>,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub exists: bool,
}

fn parse_id(raw: &str) -> Result<i64, RefbookError> {
    raw.parse()
        .map_err(|_| RefbookError::InvalidInput(format!("malformed refbook id '{raw}'")))
}

/// GET /refbooks/ — list refbooks, optionally as of a date.
pub async fn list_refbooks(
    Extension(service): Extension<Arc<RefbookService>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RefbooksResponse>, AppError> {
    let as_of = non_empty(query.date.as_deref()).map(parse_date).transpose()?;
    let refbooks = service.list_refbooks(as_of).await?;
    Ok(Json(RefbooksResponse { refbooks }))
}

/// GET /refbooks/:id/elements — elements of the resolved snapshot.
pub async fn list_elements(
    Extension(service): Extension<Arc<RefbookService>>,
    Path(id): Path<String>,
    Query(query): Query<ElementsQuery>,
) -> Result<Json<ElementsResponse>, AppError> {
    let refbook_id = parse_id(&id)?;
    let version = non_empty(query.version.as_deref());
    let today = Local::now().date_naive();
    let elements = service.list_elements(refbook_id, version, today).await?;
    Ok(Json(ElementsResponse { elements }))
}

/// GET /refbooks/:id/check_element — exact code/value existence.
pub async fn check_element(
    Extension(service): Extension<Arc<RefbookService>>,
    Path(id): Path<String>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<CheckResponse>, AppError> {
    let refbook_id = parse_id(&id)?;
    let code = require_param(query.code.as_deref(), "code")?;
    let value = require_param(query.value.as_deref(), "value")?;
    let version = non_empty(query.version.as_deref());
    let today = Local::now().date_naive();
    let exists = service
        .check_element(refbook_id, code, value, version, today)
        .await?;
    Ok(Json(CheckResponse { exists }))
}
