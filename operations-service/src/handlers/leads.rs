use super::{delete_entity, find_entity, list_entities};
use crate::dtos::{CreateLeadRequest, ListLeadsQuery};
use crate::filters::lead_predicate;
use crate::models::Lead;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 25;

pub async fn list_leads(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListLeadsQuery>,
) -> Result<ApiResponse<Vec<Lead>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(&state.db, lead_predicate(&query), pagination, "Leads retrieved successfully")
        .await
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Lead>, AppError> {
    let lead = find_entity::<Lead>(&state.db, id).await?;
    Ok(ApiResponse::ok("Lead retrieved successfully", lead))
}

pub async fn create_lead(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeadRequest>,
) -> Result<ApiResponse<Lead>, AppError> {
    let lead = state.db.create_lead(&payload.into()).await?;
    record_resource_operation("lead", "create");
    Ok(ApiResponse::created("Lead created successfully", lead))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Lead>, AppError> {
    let lead = delete_entity::<Lead>(&state.db, id).await?;
    record_resource_operation("lead", "delete");
    Ok(ApiResponse::ok("Lead deleted successfully", lead))
}
