pub mod config;
pub mod dtos;
pub mod filters;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod routes;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{AppState, Application};
