//! Department and product DTOs.

use super::validate_non_negative_amount;
use crate::models::{CreateDepartment, CreateProduct, UpdateDepartment, UpdateProduct};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListDepartmentsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 150, message = "Department name is required"))]
    pub name: String,
    pub description: Option<String>,
}

impl From<CreateDepartmentRequest> for CreateDepartment {
    fn from(req: CreateDepartmentRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 150, message = "Department name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateDepartmentRequest> for UpdateDepartment {
    fn from(req: UpdateDepartmentRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "SKU is required"))]
    pub sku: String,
    pub category: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub price: Decimal,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter ISO code"))]
    pub currency: String,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            sku: req.sku,
            category: req.category,
            price: req.price,
            currency: req.currency.to_uppercase(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(custom(function = "validate_non_negative_amount"))]
    pub price: Option<Decimal>,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            price: req.price,
        }
    }
}
