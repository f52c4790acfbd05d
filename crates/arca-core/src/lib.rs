//! Arca Core Library
//!
//! This crate provides the shared domain types for Arca: configuration,
//! error types, attachment categories, and the storage backend discriminator.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, GithubConfig, LocalConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::Category;
pub use storage_types::StorageBackend;
