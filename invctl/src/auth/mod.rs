//! Authentication and session handling.
//!
//! The panel uses session-token authentication: staff log in with email
//! and password at `/api/auth/login` and receive a signed token, both in
//! the response body (for `Authorization: Bearer` clients) and as a
//! secure HTTP-only cookie (for the browser). Every protected API
//! handler authenticates the request through the [`current_user`]
//! extractor; browser page navigation is additionally fronted by the
//! cookie-presence redirect in [`middleware`].
//!
//! # Modules
//!
//! - [`current_user`]: the per-request auth gate (token extraction +
//!   verification)
//! - [`middleware`]: the signature-blind page redirect guard
//! - [`password`]: password hashing and verification using Argon2
//! - [`session`]: session token creation and verification

pub mod current_user;
pub mod middleware;
pub mod password;
pub mod session;
