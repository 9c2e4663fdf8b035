//! Staff account listing and deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::models::{MessageResponse, users::CurrentUser, users::UserResponse},
    db::{
        errors::DbError,
        handlers::{Repository, Users},
        retry::retry_transient,
    },
    errors::Error,
    types::UserId,
};

/// List staff accounts
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, Error> {
    let users = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Users::new(&mut conn).list().await
        }
    })
    .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Delete a staff account
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = id))]
pub async fn delete_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<MessageResponse>, Error> {
    // Deleting the account behind an active session does not revoke the
    // session: issued tokens stay valid until expiry.
    let deleted = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Users::new(&mut conn).delete(id).await
        }
    })
    .await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        });
    }

    Ok(Json(MessageResponse::new("User deleted")))
}
