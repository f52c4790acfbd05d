//! Arca API Library
//!
//! This crate provides the HTTP API handlers and application setup for the
//! attachment storage service.

// Module declarations
pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
