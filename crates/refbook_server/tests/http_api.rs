//! HTTP-level contract tests for the three refbook endpoints.
//!
//! Backed by the in-memory store, so they run without a database. These
//! prove the wire contract: response body shapes, empty-result semantics,
//! and the uniform 404 `{"error"}` failure response.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use tower::ServiceExt;

use refbook_core::memory::MemoryRefbookStore;
use refbook_core::ports::RefbookStore;
use refbook_core::service::RefbookService;
use refbook_core::types::{NewRefbook, NewRefbookElement, NewRefbookVersion};
use refbook_server::router::build_router;

/// Seeds a known scenario:
/// one refbook (`test_code`) with a `test_version` snapshot effective
/// 1000-10-10 holding the element `test_code` → `test_value`, plus a
/// second refbook whose only version lies far in the future.
async fn build_test_app() -> (Router, i64, i64) {
    let store = Arc::new(MemoryRefbookStore::new());

    let rb = store
        .insert_refbook(NewRefbook {
            code: "test_code".into(),
            name: "test_name".into(),
            description: Some("test_description".into()),
        })
        .await
        .unwrap();
    let v = store
        .insert_version(NewRefbookVersion {
            refbook_id: rb.id,
            version: "test_version".into(),
            created_date: Some("1000-10-10".parse().unwrap()),
        })
        .await
        .unwrap();
    store
        .insert_element(NewRefbookElement {
            version_id: v.id,
            code: "test_code".into(),
            value: "test_value".into(),
        })
        .await
        .unwrap();

    let future = store
        .insert_refbook(NewRefbook {
            code: "future_code".into(),
            name: "future_name".into(),
            description: None,
        })
        .await
        .unwrap();
    let fv = store
        .insert_version(NewRefbookVersion {
            refbook_id: future.id,
            version: "99.0".into(),
            created_date: Some("9999-01-01".parse().unwrap()),
        })
        .await
        .unwrap();
    store
        .insert_element(NewRefbookElement {
            version_id: fv.id,
            code: "later".into(),
            value: "not yet effective".into(),
        })
        .await
        .unwrap();

    let service = Arc::new(RefbookService::new(store));
    (build_router(service), rb.id, future.id)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ── Listing ────────────────────────────────────────────────────

#[tokio::test]
async fn listing_without_date_returns_all_refbooks() {
    let (app, rb_id, future_id) = build_test_app().await;
    let (status, body) = get(&app, "/refbooks/").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["refbooks"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert!(ids.contains(&rb_id) && ids.contains(&future_id));
}

#[tokio::test]
async fn listing_with_date_filters_on_effective_versions() {
    let (app, rb_id, _) = build_test_app().await;

    let (status, body) = get(&app, "/refbooks/?date=1000-10-10").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["refbooks"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64().unwrap(), rb_id);
    assert_eq!(rows[0]["code"], "test_code");
    assert_eq!(rows[0]["name"], "test_name");

    // No refbook has a version effective this early.
    let (status, body) = get(&app, "/refbooks/?date=0999-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["refbooks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn listing_with_empty_date_param_is_unfiltered() {
    let (app, _, _) = build_test_app().await;
    let (status, body) = get(&app, "/refbooks/?date=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refbooks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_date_yields_uniform_error() {
    let (app, _, _) = build_test_app().await;
    for uri in ["/refbooks/?date=2023-13-40", "/refbooks/?date=not-a-date"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string(), "{body}");
    }
}

// ── Element listing ────────────────────────────────────────────

#[tokio::test]
async fn explicit_version_returns_its_elements() {
    let (app, rb_id, _) = build_test_app().await;
    let (status, body) = get(&app, &format!("/refbooks/{rb_id}/elements?version=test_version")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["elements"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["code"], "test_code");
    assert_eq!(rows[0]["value"], "test_value");
}

#[tokio::test]
async fn omitted_version_resolves_latest_effective_today() {
    let (app, rb_id, _) = build_test_app().await;
    // The only snapshot is dated 1000-10-10, so it is always effective.
    let (status, body) = get(&app, &format!("/refbooks/{rb_id}/elements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elements"].as_array().unwrap().len(), 1);

    // Empty version parameter behaves like an omitted one.
    let (status, body) = get(&app, &format!("/refbooks/{rb_id}/elements?version=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["elements"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn future_dated_versions_yield_empty_elements() {
    let (app, _, future_id) = build_test_app().await;
    let (status, body) = get(&app, &format!("/refbooks/{future_id}/elements")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["elements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_version_or_refbook_yields_empty_not_error() {
    let (app, rb_id, _) = build_test_app().await;

    let (status, body) = get(&app, &format!("/refbooks/{rb_id}/elements?version=nope")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["elements"].as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/refbooks/424242/elements").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["elements"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn non_integer_id_yields_uniform_error() {
    let (app, _, _) = build_test_app().await;
    let (status, body) = get(&app, "/refbooks/abc/elements").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ── Existence check ────────────────────────────────────────────

#[tokio::test]
async fn check_finds_exact_pair() {
    let (app, rb_id, _) = build_test_app().await;
    let (status, body) = get(
        &app,
        &format!("/refbooks/{rb_id}/check_element?code=test_code&value=test_value&version=test_version"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], serde_json::json!(true));
}

#[tokio::test]
async fn check_without_version_uses_current_snapshot() {
    let (app, rb_id, _) = build_test_app().await;
    let (status, body) = get(
        &app,
        &format!("/refbooks/{rb_id}/check_element?code=test_code&value=test_value"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], serde_json::json!(true));
}

#[tokio::test]
async fn check_mismatch_is_false_not_error() {
    let (app, rb_id, future_id) = build_test_app().await;

    for uri in [
        format!("/refbooks/{rb_id}/check_element?code=test_code&value=other"),
        format!("/refbooks/{rb_id}/check_element?code=TEST_CODE&value=test_value"),
        format!("/refbooks/{rb_id}/check_element?code=test_code&value=test_value&version=nope"),
        format!("/refbooks/{future_id}/check_element?code=later&value=not+yet+effective"),
        format!("/refbooks/424242/check_element?code=test_code&value=test_value"),
    ] {
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["exists"], serde_json::json!(false), "{uri}");
    }
}

#[tokio::test]
async fn check_missing_required_params_yields_uniform_error() {
    let (app, rb_id, _) = build_test_app().await;

    for uri in [
        format!("/refbooks/{rb_id}/check_element?value=test_value"),
        format!("/refbooks/{rb_id}/check_element?code=test_code"),
        format!("/refbooks/{rb_id}/check_element?code=&value=test_value"),
        format!("/refbooks/{rb_id}/check_element"),
    ] {
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}
