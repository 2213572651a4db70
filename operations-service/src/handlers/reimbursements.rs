use super::{find_entity, list_entities, not_found};
use crate::dtos::{CreateReimbursementRequest, ListReimbursementsQuery, UpdateReimbursementRequest};
use crate::filters::reimbursement_predicate;
use crate::models::Reimbursement;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 10;

pub async fn list_reimbursements(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListReimbursementsQuery>,
) -> Result<ApiResponse<Vec<Reimbursement>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        reimbursement_predicate(&query),
        pagination,
        "Reimbursements retrieved successfully",
    )
    .await
}

pub async fn get_reimbursement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Reimbursement>, AppError> {
    let reimbursement = find_entity::<Reimbursement>(&state.db, id).await?;
    Ok(ApiResponse::ok("Reimbursement retrieved successfully", reimbursement))
}

pub async fn create_reimbursement(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReimbursementRequest>,
) -> Result<ApiResponse<Reimbursement>, AppError> {
    let reimbursement = state.db.create_reimbursement(&payload.into()).await?;
    record_resource_operation("reimbursement", "create");
    Ok(ApiResponse::created("Reimbursement created successfully", reimbursement))
}

pub async fn update_reimbursement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateReimbursementRequest>,
) -> Result<ApiResponse<Reimbursement>, AppError> {
    let reimbursement = state
        .db
        .update_reimbursement(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Reimbursement>(id))?;
    record_resource_operation("reimbursement", "update");
    Ok(ApiResponse::ok("Reimbursement updated successfully", reimbursement))
}
