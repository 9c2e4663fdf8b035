//! Product listing, deletion, and the inventory view.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    api::models::{
        MessageResponse,
        products::{InventoryItemResponse, InventoryResponse, ProductResponse},
        users::CurrentUser,
    },
    db::{
        errors::DbError,
        handlers::{Products, Repository},
        retry::retry_transient,
    },
    errors::Error,
    types::ProductId,
};

/// List products with their group linkage
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "List of products", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ProductResponse>>, Error> {
    let products = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Products::new(&mut conn).list().await
        }
    })
    .await?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Inventory view: products with availability and date fields
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "products",
    responses(
        (status = 200, description = "Inventory listing", body = InventoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn inventory(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<InventoryResponse>, Error> {
    let products = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Products::new(&mut conn).list().await
        }
    })
    .await?;

    Ok(Json(InventoryResponse {
        products: products
            .into_iter()
            .map(InventoryItemResponse::from)
            .collect(),
    }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(product_id = id))]
pub async fn delete_product(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>, Error> {
    let deleted = retry_transient(&state.config.database.retry, || {
        let pool = state.db.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(DbError::from)?;
            Products::new(&mut conn).delete(id).await
        }
    })
    .await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        });
    }

    Ok(Json(MessageResponse::new("Product deleted")))
}
