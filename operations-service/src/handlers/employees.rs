use super::{delete_entity, find_entity, list_entities, not_found};
use crate::dtos::{CreateEmployeeRequest, ListEmployeesQuery, UpdateEmployeeRequest};
use crate::filters::employee_predicate;
use crate::models::Employee;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 25;

pub async fn list_employees(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListEmployeesQuery>,
) -> Result<ApiResponse<Vec<Employee>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        employee_predicate(&query),
        pagination,
        "Employees retrieved successfully",
    )
    .await
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Employee>, AppError> {
    let employee = find_entity::<Employee>(&state.db, id).await?;
    Ok(ApiResponse::ok("Employee retrieved successfully", employee))
}

pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> Result<ApiResponse<Employee>, AppError> {
    let employee = state.db.create_employee(&payload.into()).await?;
    record_resource_operation("employee", "create");
    Ok(ApiResponse::created("Employee created successfully", employee))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<ApiResponse<Employee>, AppError> {
    let employee = state
        .db
        .update_employee(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Employee>(id))?;
    record_resource_operation("employee", "update");
    Ok(ApiResponse::ok("Employee updated successfully", employee))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Employee>, AppError> {
    let employee = delete_entity::<Employee>(&state.db, id).await?;
    record_resource_operation("employee", "delete");
    Ok(ApiResponse::ok("Employee deleted successfully", employee))
}
