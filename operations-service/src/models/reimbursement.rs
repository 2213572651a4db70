//! Expense reimbursement model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::query::Entity;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReimbursementStatus::Pending => "pending",
            ReimbursementStatus::Approved => "approved",
            ReimbursementStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reimbursement {
    pub id: i64,
    pub employee_id: i64,
    pub title: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Reimbursement {
    const TABLE: &'static str = "reimbursements";
    const COLUMNS: &'static str =
        "id, employee_id, title, amount, currency, status, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Reimbursement";
}

#[derive(Debug, Clone)]
pub struct CreateReimbursement {
    pub employee_id: i64,
    pub title: String,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReimbursement {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<ReimbursementStatus>,
}
