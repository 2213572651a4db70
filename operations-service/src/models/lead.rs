//! Sales lead model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::Entity;
use sqlx::FromRow;

/// A prospective customer. `organization_id` is set once the lead has been
/// converted into a customer organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i64>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Lead {
    const TABLE: &'static str = "leads";
    const COLUMNS: &'static str =
        "id, name, email, organization_id, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "Lead";
}

#[derive(Debug, Clone)]
pub struct CreateLead {
    pub name: String,
    pub email: Option<String>,
    pub organization_id: Option<i64>,
}
