//! Arca Storage Library
//!
//! This crate provides the storage abstraction and implementations for Arca.
//! It includes the Storage trait, the three backends (GitHub contents API,
//! local filesystem, inline base64), and the fallback chain that routes
//! uploads and deletions across them.
//!
//! # Storage key format
//!
//! Storage keys are category-scoped. All backends use the same key layout
//! for consistency:
//!
//! - `{category_dir}/{file_name}` (e.g. `budget-files/1722945600000-report.pdf`)
//!
//! File names carry a millisecond-timestamp prefix so two uploads of the
//! same original name land on distinct keys. Keys must not contain `..` or a
//! leading `/`. Key generation is centralized in the `keys` module so all
//! backends stay consistent.

pub mod chain;
pub mod factory;
pub mod keys;
pub mod traits;

#[cfg(feature = "backend-github")]
pub mod github;
#[cfg(feature = "backend-inline")]
pub mod inline;
#[cfg(feature = "backend-local")]
pub mod local;

// Re-export commonly used types
pub use arca_core::StorageBackend;
pub use chain::StorageChain;
pub use factory::create_chain;
#[cfg(feature = "backend-github")]
pub use github::GithubStorage;
#[cfg(feature = "backend-inline")]
pub use inline::InlineStorage;
#[cfg(feature = "backend-local")]
pub use local::LocalStorage;
pub use traits::{FileLocator, Storage, StorageError, StorageResult, StoredFile};
