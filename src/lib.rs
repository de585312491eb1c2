//! Staffdesk
//!
//! Employee and division records for a single-user dashboard, persisted as JSON blobs in a local
//! key-value store.

pub mod app;
pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;

pub use app::AppState;
pub use errors::AppError;
