//! JSON response envelope shared by every endpoint.

use crate::query::{Page, PageMeta};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{ message, statusCode, data, meta? }`. `meta` is only present on
/// paginated responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub message: String,
    pub status_code: u16,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
            data,
            meta: None,
        }
    }
}

impl<E> ApiResponse<Vec<E>> {
    pub fn page(message: impl Into<String>, page: Page<E>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::OK.as_u16(),
            data: page.data,
            meta: Some(page.meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PaginationRequest;
    use serde_json::json;

    #[test]
    fn single_resource_omits_meta() {
        let body = serde_json::to_value(ApiResponse::ok("FAQ fetched", json!({"id": 1}))).unwrap();
        assert_eq!(
            body,
            json!({"message": "FAQ fetched", "statusCode": 200, "data": {"id": 1}})
        );
    }

    #[test]
    fn page_carries_meta() {
        let pagination = PaginationRequest::new(2, 10).unwrap();
        let page = Page::new(vec![1, 2, 3], pagination, 13);
        let body = serde_json::to_value(ApiResponse::page("Listed", page)).unwrap();
        assert_eq!(
            body["meta"],
            json!({"page": 2, "perPage": 10, "total": 13, "pageCount": 2})
        );
        assert_eq!(body["data"], json!([1, 2, 3]));
    }
}
