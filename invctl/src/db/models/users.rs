//! Database models for staff accounts.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::UserId;

/// Full user row, including the password hash. Never serialized to
/// clients; the API layer converts to [`crate::api::models::users`]
/// shapes that omit the hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile update. `password_hash` is `None` when the caller did not
/// supply a new password, in which case the stored hash is kept.
#[derive(Debug, Clone)]
pub struct ProfileUpdateDBRequest {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}
