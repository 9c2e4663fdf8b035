//! Login and logout handlers.

use axum::extract::State;
use axum::Json;

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        auth::{LoginBody, LoginRequest, LoginResponse, LogoutResponse},
    },
    auth::{password, session},
    config::Config,
    db::{errors::DbError, handlers::Users, retry::retry_transient},
    errors::Error,
};

/// The one error every failed login gets, whichever check rejected it.
/// Distinguishing "no such account" from "wrong password" would let
/// callers probe which emails exist.
fn invalid_credentials() -> Error {
    Error::Unauthenticated {
        message: Some("Invalid email or password".to_string()),
    }
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = LoginBody),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<LoginResponse, Error> {
    let (email, password) = match (request.email.as_deref(), request.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email.to_string(), password.to_string())
        }
        _ => {
            return Err(Error::BadRequest {
                message: "Email and password are required".to_string(),
            });
        }
    };

    let user = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        let email = email.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Users::new(&mut conn).get_by_email(&email).await
        }
    })
    .await?
    .ok_or_else(invalid_credentials)?;

    // Verify the password on a blocking thread to avoid stalling the runtime
    let hash = user.password_hash.clone();
    let candidate = password.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&candidate, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(invalid_credentials());
    }

    let token = session::create_session_token(user.id, &user.email, &state.config)?;
    let cookie = session_cookie(&token, &state.config);

    Ok(LoginResponse {
        body: LoginBody {
            message: "Login successful".to_string(),
            token,
        },
        cookie,
    })
}

/// Logout (clear session cookie)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<LogoutResponse, Error> {
    // Overwrite the cookie with an empty value and zero max-age. The
    // token itself stays cryptographically valid until its natural
    // expiry; the server holds no revocation list.
    Ok(LogoutResponse {
        body: MessageResponse::new("Logout successful"),
        cookie: clear_session_cookie(&state.config),
    })
}

/// Build the session cookie set on successful login.
pub(crate) fn session_cookie(token: &str, config: &Config) -> String {
    let session = &config.auth.session;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}; Max-Age={}",
        session.cookie_name,
        token,
        session.cookie_same_site,
        session.timeout.as_secs()
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the clearing cookie set on logout.
pub(crate) fn clear_session_cookie(config: &Config) -> String {
    let session = &config.auth.session;
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite={}; Max-Age=0",
        session.cookie_name, session.cookie_same_site
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, lazy_test_state};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum_test::TestServer;
    use serde_json::json;

    fn auth_router() -> axum::Router {
        axum::Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .with_state(lazy_test_state())
    }

    #[test]
    fn test_failed_login_error_is_uniform() {
        // Unknown email and wrong password both go through this one
        // constructor, so the status and message cannot diverge.
        let err = invalid_credentials();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[test]
    fn test_session_cookie_format() {
        let config = create_test_config();
        let cookie = session_cookie("abc.def.ghi", &config);

        assert!(cookie.starts_with("token=abc.def.ghi; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
        // Test config is not HTTPS
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let mut config = create_test_config();
        config.auth.session.cookie_secure = true;

        assert!(session_cookie("t", &config).ends_with("; Secure"));
        assert!(clear_session_cookie(&config).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_has_zero_max_age_and_empty_value() {
        let config = create_test_config();
        let cookie = clear_session_cookie(&config);

        assert!(cookie.starts_with("token=; "));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_login_rejects_missing_fields() {
        let server = TestServer::new(auth_router()).unwrap();

        for body in [
            json!({}),
            json!({"email": "staff@example.com"}),
            json!({"password": "hunter2"}),
            json!({"email": "", "password": "hunter2"}),
            json!({"email": "staff@example.com", "password": ""}),
        ] {
            let response = server.post("/api/auth/login").json(&body).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let message: MessageResponse = response.json();
            assert_eq!(message.message, "Email and password are required");
        }
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let server = TestServer::new(auth_router()).unwrap();

        let response = server.post("/api/auth/logout").await;
        response.assert_status(StatusCode::OK);

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("logout must set a clearing cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("token=;"));
        assert!(set_cookie.contains("Max-Age=0"));

        let message: MessageResponse = response.json();
        assert_eq!(message.message, "Logout successful");
    }
}
