//! Leave credit handlers, including the on-demand accrual run.

use super::{find_entity, list_entities};
use crate::dtos::{AccrualRunResponse, CreateLeaveCreditRequest, ListLeaveCreditsQuery};
use crate::filters::leave_credit_predicate;
use crate::jobs::AccrualError;
use crate::models::LeaveCredit;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 25;

impl From<AccrualError> for AppError {
    fn from(err: AccrualError) -> Self {
        match err {
            AccrualError::AlreadyRunning => AppError::Conflict(anyhow::anyhow!(
                "A leave accrual run is already in progress"
            )),
            AccrualError::Selection(e) => AppError::Storage(e),
        }
    }
}

pub async fn list_leave_credits(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListLeaveCreditsQuery>,
) -> Result<ApiResponse<Vec<LeaveCredit>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        leave_credit_predicate(&query),
        pagination,
        "Leave credits retrieved successfully",
    )
    .await
}

pub async fn get_leave_credit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<LeaveCredit>, AppError> {
    let credit = find_entity::<LeaveCredit>(&state.db, id).await?;
    Ok(ApiResponse::ok("Leave credit retrieved successfully", credit))
}

/// Manual credit entered by an administrator.
pub async fn create_leave_credit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeaveCreditRequest>,
) -> Result<ApiResponse<LeaveCredit>, AppError> {
    let credit = state.db.create_leave_credit(&payload.into()).await?;
    record_resource_operation("leave_credit", "create");
    Ok(ApiResponse::created("Leave credit created successfully", credit))
}

/// Run the accrual job for today. 409 while a run is already in progress.
pub async fn run_accrual(
    State(state): State<AppState>,
) -> Result<ApiResponse<AccrualRunResponse>, AppError> {
    let summary = state.accrual.run_now("manual").await?;
    Ok(ApiResponse::ok(
        "Leave accrual run completed",
        AccrualRunResponse::from(summary),
    ))
}
