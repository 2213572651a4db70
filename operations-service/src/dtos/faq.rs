use crate::models::{CreateFaq, UpdateFaq};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListFaqsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 500, message = "perPage must be between 1 and 500"))]
    pub per_page: Option<u32>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl From<CreateFaqRequest> for CreateFaq {
    fn from(req: CreateFaqRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            category: req.category,
            is_published: req.is_published,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFaqRequest {
    #[validate(length(min = 1, max = 255, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

impl From<UpdateFaqRequest> for UpdateFaq {
    fn from(req: UpdateFaqRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            category: req.category,
            is_published: req.is_published,
        }
    }
}
