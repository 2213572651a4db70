//! service-core: Shared infrastructure for the operations backend.
pub mod config;
pub mod endpoint;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod query;
pub mod response;
pub mod scheduler;

pub use async_trait;
pub use axum;
pub use serde;
pub use serde_json;
pub use sqlx;
pub use tokio;
pub use tokio_util;
pub use tower;
pub use tower_http;
pub use tracing;
pub use validator;
