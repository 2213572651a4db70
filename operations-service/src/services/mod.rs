//! Services module for operations-service.

pub mod database;
pub mod metrics;

pub use database::Database;
pub use metrics::{
    get_metrics, init_metrics, record_accrual_item, record_accrual_run, record_resource_operation,
};
