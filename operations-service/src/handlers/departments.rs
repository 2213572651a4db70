use super::{delete_entity, find_entity, list_entities, not_found};
use crate::dtos::{CreateDepartmentRequest, ListDepartmentsQuery, UpdateDepartmentRequest};
use crate::filters::department_predicate;
use crate::models::Department;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 25;

pub async fn list_departments(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListDepartmentsQuery>,
) -> Result<ApiResponse<Vec<Department>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        department_predicate(&query),
        pagination,
        "Departments retrieved successfully",
    )
    .await
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Department>, AppError> {
    let department = find_entity::<Department>(&state.db, id).await?;
    Ok(ApiResponse::ok("Department retrieved successfully", department))
}

pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartmentRequest>,
) -> Result<ApiResponse<Department>, AppError> {
    let department = state.db.create_department(&payload.into()).await?;
    record_resource_operation("department", "create");
    Ok(ApiResponse::created("Department created successfully", department))
}

pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartmentRequest>,
) -> Result<ApiResponse<Department>, AppError> {
    let department = state
        .db
        .update_department(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Department>(id))?;
    record_resource_operation("department", "update");
    Ok(ApiResponse::ok("Department updated successfully", department))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Department>, AppError> {
    let department = delete_entity::<Department>(&state.db, id).await?;
    record_resource_operation("department", "delete");
    Ok(ApiResponse::ok("Department deleted successfully", department))
}
