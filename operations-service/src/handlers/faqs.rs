//! FAQ handlers.

use super::{delete_entity, find_entity, list_entities, not_found};
use crate::dtos::{CreateFaqRequest, ListFaqsQuery, UpdateFaqRequest};
use crate::filters::{faq_predicate, published_faq_predicate};
use crate::models::Faq;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 10;

pub async fn list_faqs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListFaqsQuery>,
) -> Result<ApiResponse<Vec<Faq>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(&state.db, faq_predicate(&query), pagination, "FAQs retrieved successfully")
        .await
}

/// Unauthenticated listing of published FAQs.
pub async fn list_published_faqs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListFaqsQuery>,
) -> Result<ApiResponse<Vec<Faq>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        published_faq_predicate(&query),
        pagination,
        "Published FAQs retrieved successfully",
    )
    .await
}

pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Faq>, AppError> {
    let faq = find_entity::<Faq>(&state.db, id).await?;
    Ok(ApiResponse::ok("FAQ retrieved successfully", faq))
}

pub async fn create_faq(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFaqRequest>,
) -> Result<ApiResponse<Faq>, AppError> {
    let faq = state.db.create_faq(&payload.into()).await?;
    record_resource_operation("faq", "create");
    Ok(ApiResponse::created("FAQ created successfully", faq))
}

pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateFaqRequest>,
) -> Result<ApiResponse<Faq>, AppError> {
    let faq = state
        .db
        .update_faq(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Faq>(id))?;
    record_resource_operation("faq", "update");
    Ok(ApiResponse::ok("FAQ updated successfully", faq))
}

pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Faq>, AppError> {
    let faq = delete_entity::<Faq>(&state.db, id).await?;
    record_resource_operation("faq", "delete");
    Ok(ApiResponse::ok("FAQ deleted successfully", faq))
}

/// Undo a soft delete. Looks past the soft-delete filter.
pub async fn restore_faq(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Faq>, AppError> {
    let store = state.db.store::<Faq>();
    if store.find_by_id(id, true).await?.is_none() {
        return Err(not_found::<Faq>(id));
    }
    let faq = store
        .restore(id)
        .await?
        .ok_or_else(|| AppError::Conflict(anyhow::anyhow!("FAQ {} is not deleted", id)))?;
    record_resource_operation("faq", "restore");
    Ok(ApiResponse::ok("FAQ restored successfully", faq))
}
