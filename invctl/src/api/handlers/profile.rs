//! The caller's own profile: view and update.

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        users::{CurrentUser, ProfileResponse, ProfileUpdateRequest},
    },
    auth::password::{self, Argon2Params},
    db::{
        errors::DbError, handlers::Users, models::users::ProfileUpdateDBRequest,
        retry::retry_transient,
    },
    errors::Error,
};

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Current user's profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, Error> {
    // The auth gate trusts the token claim; only here do we go back to
    // the users table. A deleted account with a live session lands on
    // this 404.
    let user_id = user.id;
    let profile = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Users::new(&mut conn).get_by_id(user_id).await
        }
    })
    .await?
    .ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: user_id.to_string(),
    })?;

    Ok(Json(ProfileResponse::from(profile)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/user/update",
    request_body = ProfileUpdateRequest,
    tag = "profile",
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing fields or email already in use"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<MessageResponse>, Error> {
    let (name, email) = match (request.name.as_deref(), request.email.as_deref()) {
        (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
            (name.to_string(), email.to_string())
        }
        _ => {
            return Err(Error::BadRequest {
                message: "Name and email are required".to_string(),
            });
        }
    };

    // Re-hash only when a new password was actually supplied
    let password_hash = match request.password.as_deref() {
        Some(new_password) if !new_password.is_empty() => {
            let password_config = &state.config.auth.password;
            if new_password.len() < password_config.min_length {
                return Err(Error::BadRequest {
                    message: format!(
                        "Password must be at least {} characters",
                        password_config.min_length
                    ),
                });
            }
            if new_password.len() > password_config.max_length {
                return Err(Error::BadRequest {
                    message: format!(
                        "Password must be no more than {} characters",
                        password_config.max_length
                    ),
                });
            }

            let params = Argon2Params::from(password_config);
            let new_password = new_password.to_string();
            let hash = tokio::task::spawn_blocking(move || {
                password::hash_string_with_params(&new_password, Some(params))
            })
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password hashing task: {e}"),
            })??;
            Some(hash)
        }
        _ => None,
    };

    let update = ProfileUpdateDBRequest {
        name,
        email,
        password_hash,
    };

    let user_id = user.id;
    let updated = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        let update = update.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            let mut users = Users::new(&mut conn);

            if users.email_taken_by_other(&update.email, user_id).await? {
                // Duplicate email; turned into a Conflict by the caller
                return Ok(None);
            }

            users.update_profile(user_id, &update).await.map(Some)
        }
    })
    .await;

    match updated {
        Ok(Some(_)) => Ok(Json(MessageResponse::new("Profile updated successfully"))),
        Ok(None) => Err(Error::Conflict {
            message: "Email is already in use".to_string(),
        }),
        Err(DbError::NotFound) => Err(Error::NotFound {
            resource: "User".to_string(),
            id: user_id.to_string(),
        }),
        // The unique index backstops the pre-check if two updates race.
        Err(DbError::UniqueViolation { .. }) => Err(Error::Conflict {
            message: "Email is already in use".to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
