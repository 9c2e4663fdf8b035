//! Common type definitions.
//!
//! Entity identifiers are plain `i64` values (the schema uses bigserial
//! keys) wrapped in type aliases so signatures stay readable:
//!
//! - [`UserId`]: staff account identifier
//! - [`GroupId`]: arrival group identifier
//! - [`ProductId`]: tracked product identifier

/// Staff account identifier.
pub type UserId = i64;
/// Arrival group identifier.
pub type GroupId = i64;
/// Tracked product identifier.
pub type ProductId = i64;
