//! Request authentication: the per-request gate every protected handler
//! goes through.
//!
//! A candidate token is extracted by an ordered list of strategies - the
//! `Authorization: Bearer` header first, then the session cookie; the
//! first match wins. The token is then verified by the session codec and
//! the decoded claim becomes the caller's identity. The gate does NOT
//! re-fetch the user row: a deleted account keeps a valid session until
//! the token expires. This is a documented limitation, not an oversight.
//!
//! All rejection reasons (no token, bad signature, expired) surface to
//! the client as the same generic 401; only the logs distinguish them.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};

/// Token from the `Authorization: Bearer <token>` header, if present.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Token from the session cookie, if present.
fn cookie_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let cookie_str = parts
        .headers
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;

    cookie_str
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

/// Extract a candidate session token from the request. Strategies are
/// tried in order; the first one that yields a token wins.
pub(crate) fn extract_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    bearer_token(parts).or_else(|| cookie_token(parts, cookie_name))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Some(token) = extract_token(parts, &state.config.auth.session.cookie_name) else {
            debug!("request carries no session token");
            return Err(Error::Unauthenticated { message: None });
        };

        let claims = session::verify_session_token(&token, &state.config).map_err(|e| {
            debug!("session token rejected: {e:?}");
            match e {
                // Server-side problems keep their 500; everything the
                // client caused is a generic 401.
                Error::Internal { .. } => e,
                _ => Error::Unauthenticated { message: None },
            }
        })?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::create_session_token;
    use crate::test_utils::{create_test_config, lazy_test_state};
    use axum::extract::FromRequestParts as _;
    use axum::http::StatusCode;

    fn parts_with_headers(headers: &[(&str, String)]) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/api/groups");
        for (name, value) in headers {
            builder = builder.header(*name, value);
        }
        let (parts, _body) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let parts = parts_with_headers(&[
            ("authorization", "Bearer header-token".to_string()),
            ("cookie", "token=cookie-token".to_string()),
        ]);

        assert_eq!(
            extract_token(&parts, "token").as_deref(),
            Some("header-token")
        );
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie() {
        let parts = parts_with_headers(&[(
            "cookie",
            "theme=dark; token=cookie-token; lang=en".to_string(),
        )]);

        assert_eq!(
            extract_token(&parts, "token").as_deref(),
            Some("cookie-token")
        );
    }

    #[test]
    fn test_extract_token_ignores_non_bearer_authorization() {
        let parts = parts_with_headers(&[
            ("authorization", "Basic dXNlcjpwYXNz".to_string()),
            ("cookie", "token=cookie-token".to_string()),
        ]);

        assert_eq!(
            extract_token(&parts, "token").as_deref(),
            Some("cookie-token")
        );
    }

    #[test]
    fn test_extract_token_absent() {
        let parts = parts_with_headers(&[("cookie", "theme=dark".to_string())]);
        assert!(extract_token(&parts, "token").is_none());
    }

    #[tokio::test]
    async fn test_valid_cookie_token_yields_identity() {
        let state = lazy_test_state();
        let token = create_session_token(42, "staff@example.com", &state.config).unwrap();
        let mut parts = parts_with_headers(&[("cookie", format!("token={token}"))]);

        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.email, "staff@example.com");
    }

    #[tokio::test]
    async fn test_valid_bearer_token_yields_identity() {
        let state = lazy_test_state();
        let token = create_session_token(7, "staff@example.com", &state.config).unwrap();
        let mut parts = parts_with_headers(&[("authorization", format!("Bearer {token}"))]);

        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let state = lazy_test_state();
        let mut parts = parts_with_headers(&[]);

        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tampered_token_is_unauthorized_with_generic_message() {
        let state = lazy_test_state();
        let other_config = crate::config::Config {
            secret_key: Some("some-other-secret".to_string()),
            ..create_test_config()
        };
        let token = create_session_token(42, "staff@example.com", &other_config).unwrap();
        let mut parts = parts_with_headers(&[("authorization", format!("Bearer {token}"))]);

        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        // Same message as the missing-token case: the client cannot tell
        // which check failed.
        assert_eq!(
            err.user_message(),
            Error::Unauthenticated { message: None }.user_message()
        );
    }
}
