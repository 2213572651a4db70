//! Employee model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::{Entity, Filterable, Value};
use sqlx::FromRow;

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::Terminated => "terminated",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "active" => EmployeeStatus::Active,
            "terminated" => EmployeeStatus::Terminated,
            _ => EmployeeStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub department_id: Option<i64>,
    pub status: String,
    /// Anchor date for leave accrual.
    pub joining_date: NaiveDate,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn status(&self) -> EmployeeStatus {
        EmployeeStatus::from_string(&self.status)
    }
}

impl Entity for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static str = "id, full_name, email, department_id, status, joining_date, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Employee";
}

impl Filterable for Employee {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "full_name" => Some(self.full_name.clone().into()),
            "department_id" => self.department_id.map(Value::from),
            "status" => Some(self.status.clone().into()),
            "is_deleted" => Some(self.is_deleted.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub full_name: String,
    pub email: String,
    pub department_id: Option<i64>,
    pub status: EmployeeStatus,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub department_id: Option<i64>,
    pub status: Option<EmployeeStatus>,
}
