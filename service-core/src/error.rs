use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Forbidden: {0}")]
    Forbidden(anyhow::Error),

    #[error("Conflict: {0}")]
    Conflict(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Query failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(err) => err.status_code(),
            AppError::InternalError(_) | AppError::DatabaseError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ErrorResponse {
            message: String,
            status_code: u16,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let status = self.status_code();
        let (message, details) = match self {
            AppError::ValidationError(err) => {
                ("Validation error".to_string(), Some(err.to_string()))
            }
            AppError::BadRequest(err)
            | AppError::NotFound(err)
            | AppError::Forbidden(err)
            | AppError::Conflict(err) => (err.to_string(), None),
            AppError::InternalError(err) => (
                "Internal server error".to_string(),
                Some(format!("{:#?}", err)),
            ),
            AppError::ServiceUnavailable => ("Service unavailable".to_string(), None),
            AppError::DatabaseError(err) => ("Database error".to_string(), Some(err.to_string())),
            AppError::Storage(err) => ("Query failed".to_string(), Some(err.to_string())),
            AppError::ConfigError(err) => {
                ("Configuration error".to_string(), Some(err.to_string()))
            }
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), message = %message, details = ?details, "Request failed");
        }

        (
            status,
            Json(ErrorResponse {
                message,
                status_code: status.as_u16(),
                details,
            }),
        )
            .into_response()
    }
}

/// Driver-independent classification of storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Constraint,
    NotFound,
    ConnectionFailure,
    Unknown,
}

/// Error produced at the storage boundary. Carries the driver's diagnostic
/// code (a SQLSTATE for Postgres) when one exists.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}{}: {detail}", .code.as_ref().map(|c| format!(" [{}]", c)).unwrap_or_default())]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub code: Option<String>,
    pub detail: String,
}

impl StorageError {
    pub fn new(kind: StorageErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            detail: detail.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// HTTP status for this failure: client-caused conditions are 4xx,
    /// server-side conditions are 5xx.
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            StorageErrorKind::Constraint if self.code.as_deref() == Some(UNIQUE_VIOLATION) => {
                StatusCode::CONFLICT
            }
            StorageErrorKind::Constraint => StatusCode::BAD_REQUEST,
            StorageErrorKind::NotFound => StatusCode::NOT_FOUND,
            StorageErrorKind::ConnectionFailure => StatusCode::SERVICE_UNAVAILABLE,
            StorageErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                let kind = match code.as_deref() {
                    // Class 23: integrity constraint violation
                    Some(c) if c.starts_with("23") => StorageErrorKind::Constraint,
                    // Class 08: connection exception
                    Some(c) if c.starts_with("08") => StorageErrorKind::ConnectionFailure,
                    _ => StorageErrorKind::Unknown,
                };
                StorageError {
                    kind,
                    code,
                    detail: db_err.message().to_string(),
                }
            }
            sqlx::Error::RowNotFound => StorageError::new(StorageErrorKind::NotFound, err.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => {
                StorageError::new(StorageErrorKind::ConnectionFailure, err.to_string())
            }
            _ => StorageError::new(StorageErrorKind::Unknown, err.to_string()),
        }
    }
}
