//! Base repository trait for database operations.
//!
//! A repository is a data access layer for one postgres table, wrapping a
//! connection and returning domain models from [`crate::db::models`]. The
//! panel's API only ever lists and deletes whole collections, so the
//! shared surface is deliberately small; entity-specific lookups live as
//! inherent methods on the individual repositories.

use crate::db::errors::Result;

/// Base repository trait providing the operations common to every entity.
#[async_trait::async_trait]
pub trait Repository {
    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// List all entities
    async fn list(&mut self) -> Result<Vec<Self::Response>>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}
