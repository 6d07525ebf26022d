//! Admin account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::AdminId;
use super::username::Username;

/// An admin account.
///
/// The password hash is a PHC string (salt included) and is never
/// serialized; only the id, username and creation time leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: AdminId,
    pub username: Username,
    #[serde(skip)]
    pub password_hash: String,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}
