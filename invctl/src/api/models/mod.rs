//! API request and response data models.
//!
//! These structures define the public API contract and are kept separate
//! from the database models in [`crate::db::models`] so the wire format
//! and the storage layout can evolve independently. All models carry
//! `utoipa` schema annotations for the generated API docs.

pub mod auth;
pub mod dashboard;
pub mod groups;
pub mod products;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic `{"message": ...}` body used by logout, deletes, and the
/// profile update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
