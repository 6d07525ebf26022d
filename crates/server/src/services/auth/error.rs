//! Authentication error types.

use thiserror::Error;

use showroom_core::UsernameError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or unknown username).
    ///
    /// Both cases deliberately share this variant.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this username already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Username is malformed.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository error.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
