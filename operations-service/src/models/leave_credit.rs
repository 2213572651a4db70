//! Leave credit model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::query::Entity;
use sqlx::FromRow;

/// Where a leave credit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCreditSource {
    /// Written by the scheduled accrual job.
    Accrual,
    /// Entered by an administrator.
    Manual,
}

impl LeaveCreditSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveCreditSource::Accrual => "accrual",
            LeaveCreditSource::Manual => "manual",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "accrual" => LeaveCreditSource::Accrual,
            _ => LeaveCreditSource::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveCredit {
    pub id: i64,
    pub employee_id: i64,
    pub quantity: Decimal,
    pub note: String,
    pub source: String,
    /// First day of the month the accrual belongs to; `None` for manual credits.
    pub period: Option<NaiveDate>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for LeaveCredit {
    const TABLE: &'static str = "leave_credits";
    const COLUMNS: &'static str =
        "id, employee_id, quantity, note, source, period, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Leave credit";
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLeaveCredit {
    pub employee_id: i64,
    pub quantity: Decimal,
    pub note: String,
    pub source: LeaveCreditSource,
    pub period: Option<NaiveDate>,
}
