//! Request handling that does not need a live database: capability checks,
//! query and body validation, the metrics endpoint.

mod common;

use axum::http::{Method, StatusCode};
use common::{offline_router, send, send_raw, ALL};
use serde_json::json;

#[tokio::test]
async fn protected_route_without_capability_is_forbidden() {
    let router = offline_router();

    let (status, body) = send(&router, Method::GET, "/faqs", None, None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);
}

#[tokio::test]
async fn capability_for_another_resource_does_not_grant_access() {
    let router = offline_router();

    let (status, _) = send(&router, Method::GET, "/invoices", Some("faq:*"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &router,
        Method::POST,
        "/leave-credits/accrual-runs",
        Some("leave:read,leave:write"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn per_page_above_limit_is_unprocessable() {
    let router = offline_router();

    let (status, body) = send(&router, Method::GET, "/faqs?perPage=501", Some(ALL), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["statusCode"], 422);
}

#[tokio::test]
async fn page_zero_is_unprocessable() {
    let router = offline_router();

    let (status, _) = send(&router, Method::GET, "/employees?page=0", Some(ALL), None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_query_values_are_bad_requests() {
    let router = offline_router();

    let (status, _) = send(&router, Method::GET, "/invoices?status=bogus", Some(ALL), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::GET, "/invoices?leadId=abc", Some(ALL), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn published_faq_listing_is_public_but_still_validated() {
    let router = offline_router();

    // No capability header, so a 422 here means the capability layer let it through.
    let (status, _) = send(&router, Method::GET, "/faqs/published?perPage=0", None, None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_create_bodies_are_rejected() {
    let router = offline_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/products",
        Some("product:write"),
        Some(json!({"name": "Widget", "sku": "W-1", "price": "-1.00", "currency": "USD"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["statusCode"], 422);

    let (status, _) = send(
        &router,
        Method::POST,
        "/leave-credits",
        Some("leave:write"),
        Some(json!({"employeeId": 1, "quantity": "0", "note": "bonus"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &router,
        Method::POST,
        "/employees",
        Some("employee:*"),
        Some(json!({"fullName": "Ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_endpoint_is_public() {
    let router = offline_router();

    let (status, _) = send_raw(&router, Method::GET, "/metrics", None, None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn http_request_metrics_are_exposed() {
    let router = offline_router();

    send(&router, Method::GET, "/faqs", None, None).await;
    send(&router, Method::GET, "/faqs", None, None).await;
    let (status, text) = send_raw(&router, Method::GET, "/metrics", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("http_requests_total"), "{}", text);
    assert!(text.contains("http_request_duration_seconds"), "{}", text);
    assert!(text.contains(r#"path="/faqs""#), "{}", text);
}

#[tokio::test]
async fn readiness_reports_unavailable_database() {
    let router = offline_router();

    let (status, _) = send(&router, Method::GET, "/ready", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
