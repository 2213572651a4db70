//! FAQ (authority) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::query::{Entity, Filterable, Value};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Faq {
    const TABLE: &'static str = "faqs";
    const COLUMNS: &'static str =
        "id, title, content, category, is_published, is_deleted, created_at, updated_at";
    const LABEL: &'static str = "FAQ";
}

impl Filterable for Faq {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "title" => Some(self.title.clone().into()),
            "category" => self.category.clone().map(Value::from),
            "is_published" => Some(self.is_published.into()),
            "is_deleted" => Some(self.is_deleted.into()),
            _ => None,
        }
    }
}

/// Input for creating a FAQ.
#[derive(Debug, Clone)]
pub struct CreateFaq {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub is_published: bool,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateFaq {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}
