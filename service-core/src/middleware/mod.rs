pub mod capability;
pub mod metrics;
pub mod tracing;
