use super::{delete_entity, find_entity, list_entities, not_found};
use crate::dtos::{CreateInvoiceRequest, ListInvoicesQuery, UpdateInvoiceRequest};
use crate::filters::invoice_predicate;
use crate::models::Invoice;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 10;

/// `leadId` is translated to the lead's organization before the list query.
pub async fn list_invoices(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListInvoicesQuery>,
) -> Result<ApiResponse<Vec<Invoice>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    let predicate = invoice_predicate(&query, &*state.db).await?;
    list_entities(&state.db, predicate, pagination, "Invoices retrieved successfully").await
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Invoice>, AppError> {
    let invoice = find_entity::<Invoice>(&state.db, id).await?;
    Ok(ApiResponse::ok("Invoice retrieved successfully", invoice))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInvoiceRequest>,
) -> Result<ApiResponse<Invoice>, AppError> {
    let invoice = state.db.create_invoice(&payload.into()).await?;
    record_resource_operation("invoice", "create");
    Ok(ApiResponse::created("Invoice created successfully", invoice))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateInvoiceRequest>,
) -> Result<ApiResponse<Invoice>, AppError> {
    let invoice = state
        .db
        .update_invoice(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Invoice>(id))?;
    record_resource_operation("invoice", "update");
    Ok(ApiResponse::ok("Invoice updated successfully", invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Invoice>, AppError> {
    let invoice = delete_entity::<Invoice>(&state.db, id).await?;
    record_resource_operation("invoice", "delete");
    Ok(ApiResponse::ok("Invoice deleted successfully", invoice))
}
