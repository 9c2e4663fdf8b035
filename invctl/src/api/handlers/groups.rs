//! Arrival group handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::models::{MessageResponse, groups::GroupResponse, users::CurrentUser},
    db::{
        errors::DbError,
        handlers::{Groups, Repository},
        retry::retry_transient,
    },
    errors::Error,
    types::GroupId,
};

/// List arrival groups, each with its related product when one exists
#[utoipa::path(
    get,
    path = "/api/groups",
    tag = "groups",
    responses(
        (status = 200, description = "List of groups", body = Vec<GroupResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_groups(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<GroupResponse>>, Error> {
    let groups = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Groups::new(&mut conn).list().await
        }
    })
    .await?;

    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// Delete an arrival group
#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    tag = "groups",
    params(("id" = i64, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Group not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(group_id = id))]
pub async fn delete_group(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<GroupId>,
) -> Result<Json<MessageResponse>, Error> {
    let deleted = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Groups::new(&mut conn).delete(id).await
        }
    })
    .await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Group".to_string(),
            id: id.to_string(),
        });
    }

    Ok(Json(MessageResponse::new("Group deleted")))
}
