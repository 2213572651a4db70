//! Product catalogue model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::query::Entity;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static str =
        "id, name, sku, category, price, currency, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Product";
}

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
}
