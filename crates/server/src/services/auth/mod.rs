//! Authentication service.
//!
//! Password authentication for admin accounts. Hashes are Argon2id PHC
//! strings with a random per-account salt. Hashing and verification are
//! CPU-bound, so both run on the blocking thread pool.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use showroom_core::{AdminAccount, Username};

use crate::db::{AdminStore, RepositoryError};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash verified when the username is unknown, so that path costs about the
/// same as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("showroom-timing-equaliser").ok());

/// Authentication service.
///
/// Handles credential verification and admin account creation.
pub struct AuthService<'a> {
    admins: &'a AdminStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a AdminStore) -> Self {
        Self { admins }
    }

    /// Verify a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the username is unknown
    /// or the password does not match. The two cases are indistinguishable.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: &str) -> Result<AdminAccount, AuthError> {
        let password = SecretString::from(password);

        let Some(account) = self.admins.get_by_username(username).await else {
            if let Some(dummy) = DUMMY_HASH.as_ref() {
                let _ = verify_blocking(password, dummy.clone()).await;
            }
            warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if let Err(e) = verify_blocking(password, account.password_hash.clone()).await {
            warn!("Login failed");
            return Err(e);
        }

        Ok(account)
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is malformed.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UsernameTaken` if the username already exists.
    #[instrument(skip(self, password))]
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminAccount, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        let password_hash = hash_blocking(SecretString::from(password)).await?;

        let account = self
            .admins
            .insert(username, password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        info!(admin_id = %account.id, username = %account.username, "Admin account created");
        Ok(account)
    }

    /// Create the bootstrap admin account unless one with this username exists.
    ///
    /// Returns the new account, or `None` when it already existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the account cannot be created.
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Option<AdminAccount>, AuthError> {
        if self.admins.get_by_username(username).await.is_some() {
            return Ok(None);
        }

        match self.create_account(username, password.expose_secret()).await {
            Ok(account) => Ok(Some(account)),
            // Lost a race with another creator; the account exists either way
            Err(AuthError::UsernameTaken) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

async fn hash_blocking(password: SecretString) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(password.expose_secret()))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

async fn verify_blocking(password: SecretString, hash: String) -> Result<(), AuthError> {
    tokio::task::spawn_blocking(move || verify_password(password.expose_secret(), &hash))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}
