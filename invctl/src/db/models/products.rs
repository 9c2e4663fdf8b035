//! Database models for tracked products.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api::models::products::ProductStatus;
use crate::types::{GroupId, ProductId};

#[derive(Debug, Clone, FromRow)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub group_id: GroupId,
    pub name: String,
    pub serial: String,
    pub status: ProductStatus,
    pub date_code: Option<String>,
    pub date_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
