//! In-memory storage for the catalog and admin accounts.
//!
//! # Stores
//!
//! - [`ProductStore`] - Catalog products, ids from a monotonically increasing counter
//! - [`AdminStore`] - Admin accounts, unique usernames
//!
//! Each store owns its collection behind a single `tokio::sync::RwLock`:
//! queries share the read lock, every mutation takes the write lock, so a
//! reader never observes a half-applied update. Nothing is persisted; state
//! resets when the process restarts.

pub mod admins;
pub mod products;
pub mod seed;

use thiserror::Error;

pub use admins::AdminStore;
pub use products::ProductStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}
