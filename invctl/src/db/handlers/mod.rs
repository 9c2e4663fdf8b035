//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed
//! operations for one entity, and returns domain models from
//! [`crate::db::models`]. Shared operations live on the [`Repository`]
//! trait.
//!
//! # Available Repositories
//!
//! - [`Users`]: staff accounts and credential lookups
//! - [`Groups`]: arrival groups and the grouped product listing
//! - [`Products`]: tracked products and the inventory listing

pub mod groups;
pub mod products;
pub mod repository;
pub mod users;

pub use groups::Groups;
pub use products::Products;
pub use repository::Repository;
pub use users::Users;
