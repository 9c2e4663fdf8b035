//! Edge pre-filter for browser page navigations.
//!
//! Before a protected page renders, this middleware checks only that the
//! session cookie is *present* and redirects to the login page when it is
//! not. It never inspects the signature or expiry - that would cost a
//! verification on every asset-adjacent navigation for no security gain,
//! because this is NOT a security boundary: every protected API route
//! independently authenticates through
//! [`crate::auth::current_user`]. A stale or forged cookie gets the user
//! past the redirect and then a wall of 401s.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::AppState;

/// Browser-facing paths that require a session cookie to view.
const PROTECTED_PAGES: &[&str] = &["/", "/dashboard", "/products", "/groups", "/users", "/settings"];

fn is_protected_page(path: &str) -> bool {
    PROTECTED_PAGES.contains(&path)
}

fn has_session_cookie(request: &Request, cookie_name: &str) -> bool {
    request
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|header| header.to_str().ok())
        .map(|cookies| {
            cookies
                .split(';')
                .filter_map(|cookie| cookie.trim().split_once('='))
                .any(|(name, _)| name == cookie_name)
        })
        .unwrap_or(false)
}

/// Redirect unauthenticated page navigations to the login page, based
/// purely on cookie presence.
pub async fn page_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if is_protected_page(path)
        && !has_session_cookie(&request, &state.config.auth.session.cookie_name)
    {
        debug!("redirecting unauthenticated navigation to login: {path}");
        return Redirect::temporary("/login").into_response();
    }

    next.run(request).await
}
