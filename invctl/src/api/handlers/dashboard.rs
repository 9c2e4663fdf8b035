//! Dashboard counts.

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::{dashboard::DashboardResponse, users::CurrentUser},
    db::{
        errors::DbError,
        handlers::{Groups, Products},
        retry::retry_transient,
    },
    errors::Error,
};

/// Entity counts for the dashboard landing page
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Group and product counts", body = DashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<DashboardResponse>, Error> {
    let (groups_count, products_count) = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            let groups = Groups::new(&mut conn).count().await?;
            let products = Products::new(&mut conn).count().await?;
            Ok((groups, products))
        }
    })
    .await?;

    Ok(Json(DashboardResponse {
        groups_count,
        products_count,
    }))
}
