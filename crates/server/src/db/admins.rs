//! Admin account store.
//!
//! Usernames are unique across the whole collection. The uniqueness check
//! and the insert happen under one write lock, so two concurrent creations
//! of the same username cannot both succeed.

use chrono::Utc;
use tokio::sync::RwLock;

use showroom_core::{AdminAccount, AdminId, Username};

use super::RepositoryError;

/// In-memory admin account store.
#[derive(Debug)]
pub struct AdminStore {
    table: RwLock<AdminTable>,
}

#[derive(Debug)]
struct AdminTable {
    next_id: i32,
    accounts: Vec<AdminAccount>,
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(AdminTable {
                next_id: 1,
                accounts: Vec::new(),
            }),
        }
    }

    /// Get an account by exact username.
    pub async fn get_by_username(&self, username: &str) -> Option<AdminAccount> {
        self.table
            .read()
            .await
            .accounts
            .iter()
            .find(|a| a.username.as_str() == username)
            .cloned()
    }

    /// Store a new account with an already-computed password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    pub async fn insert(
        &self,
        username: Username,
        password_hash: String,
    ) -> Result<AdminAccount, RepositoryError> {
        let mut table = self.table.write().await;

        if table.accounts.iter().any(|a| a.username == username) {
            return Err(RepositoryError::Conflict(format!(
                "username already exists: {username}"
            )));
        }

        let id = AdminId::new(table.next_id);
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Conflict("admin id space exhausted".to_string()))?;

        let account = AdminAccount {
            id,
            username,
            password_hash,
            created_at: Utc::now(),
        };
        table.accounts.push(account.clone());
        Ok(account)
    }

    /// List all accounts in creation order.
    pub async fn list_all(&self) -> Vec<AdminAccount> {
        self.table.read().await.accounts.clone()
    }
}
