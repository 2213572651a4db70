use super::{delete_entity, find_entity, list_entities, not_found};
use crate::dtos::{CreateProductRequest, ListProductsQuery, UpdateProductRequest};
use crate::filters::product_predicate;
use crate::models::Product;
use crate::services::record_resource_operation;
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::query::PaginationRequest;
use service_core::response::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 25;

pub async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListProductsQuery>,
) -> Result<ApiResponse<Vec<Product>>, AppError> {
    let pagination = PaginationRequest::from_params(query.page, query.per_page, DEFAULT_PER_PAGE)?;
    list_entities(
        &state.db,
        product_predicate(&query),
        pagination,
        "Products retrieved successfully",
    )
    .await
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = find_entity::<Product>(&state.db, id).await?;
    Ok(ApiResponse::ok("Product retrieved successfully", product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = state.db.create_product(&payload.into()).await?;
    record_resource_operation("product", "create");
    Ok(ApiResponse::created("Product created successfully", product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = state
        .db
        .update_product(id, &payload.into())
        .await?
        .ok_or_else(|| not_found::<Product>(id))?;
    record_resource_operation("product", "update");
    Ok(ApiResponse::ok("Product updated successfully", product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = delete_entity::<Product>(&state.db, id).await?;
    record_resource_operation("product", "delete");
    Ok(ApiResponse::ok("Product deleted successfully", product))
}
