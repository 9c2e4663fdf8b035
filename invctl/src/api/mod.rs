//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all endpoints
//! - **[`models`]**: request/response structures defining the API contract
//!
//! All endpoints are documented with OpenAPI annotations via `utoipa`;
//! the rendered docs are served at `/docs` when the server is running.

pub mod handlers;
pub mod models;
