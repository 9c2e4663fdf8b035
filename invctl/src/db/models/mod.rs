//! Database entity models.
//!
//! Row structs deserialized from query results and the request structs
//! repositories accept. These are storage-layer shapes; the API contract
//! lives in [`crate::api::models`].

pub mod groups;
pub mod products;
pub mod users;
