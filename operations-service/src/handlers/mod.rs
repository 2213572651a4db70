//! HTTP handlers.

pub mod departments;
pub mod employees;
pub mod faqs;
pub mod invoices;
pub mod leads;
pub mod leave_credits;
pub mod products;
pub mod reimbursements;

use crate::services::{get_metrics, Database};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use service_core::error::AppError;
use service_core::query::{fetch_page, Entity, ListQuery, PaginationRequest, Predicate};
use service_core::response::ApiResponse;

/// Liveness probe; also pings the database.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ok",
                    "service": "operations-service",
                    "version": env!("CARGO_PKG_VERSION")
                })),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed - database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "operations-service",
                    "error": e.to_string()
                })),
            )
        }
    }
}

/// Readiness probe.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let metrics = get_metrics()?;
    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        metrics,
    ))
}

/// Run a paginated list query against `E`'s table.
pub(crate) async fn list_entities<E>(
    db: &Database,
    predicate: Predicate,
    pagination: PaginationRequest,
    message: &str,
) -> Result<ApiResponse<Vec<E>>, AppError>
where
    E: Entity + Serialize,
{
    let page = fetch_page(&db.store::<E>(), &ListQuery::new(predicate, pagination)).await?;
    Ok(ApiResponse::page(message, page))
}

/// Fetch a non-deleted row or 404.
pub(crate) async fn find_entity<E: Entity>(db: &Database, id: i64) -> Result<E, AppError> {
    db.store::<E>()
        .find_by_id(id, false)
        .await?
        .ok_or_else(|| not_found::<E>(id))
}

/// Soft-delete a row or 404.
pub(crate) async fn delete_entity<E: Entity>(db: &Database, id: i64) -> Result<E, AppError> {
    db.store::<E>()
        .soft_delete(id)
        .await?
        .ok_or_else(|| not_found::<E>(id))
}

pub(crate) fn not_found<E: Entity>(id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("{} {} not found", E::LABEL, id))
}
