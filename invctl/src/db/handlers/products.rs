//! Database repository for tracked products.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result, handlers::repository::Repository, models::products::ProductDBResponse,
};
use crate::types::ProductId;

pub struct Products<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Products<'c> {
    type Response = ProductDBResponse;
    type Id = ProductId;

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<ProductDBResponse>> {
        let products = sqlx::query_as::<_, ProductDBResponse>(
            "SELECT id, group_id, name, serial, status, date_code, date_text, created_at FROM products",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = id), err)]
    async fn delete(&mut self, id: ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Products<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
