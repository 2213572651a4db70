use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::Entity;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Department {
    const TABLE: &'static str = "departments";
    const COLUMNS: &'static str = "id, name, description, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Department";
}

#[derive(Debug, Clone)]
pub struct CreateDepartment {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub description: Option<String>,
}
