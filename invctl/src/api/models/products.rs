//! API request/response models for tracked products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::products::ProductDBResponse;
use crate::types::{GroupId, ProductId};

/// Availability state of a tracked product. Stored as the
/// `product_status` enum and serialized under its English labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Free,
    InUse,
    Reserved,
}

/// A product as shown in the products listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub group_id: GroupId,
    pub name: String,
    pub serial: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ProductDBResponse> for ProductResponse {
    fn from(db: ProductDBResponse) -> Self {
        Self {
            id: db.id,
            group_id: db.group_id,
            name: db.name,
            serial: db.serial,
            status: db.status,
            created_at: db.created_at,
        }
    }
}

/// A product as shown in the inventory view (date fields instead of the
/// group linkage).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemResponse {
    pub id: ProductId,
    pub name: String,
    pub serial: String,
    pub status: ProductStatus,
    pub date_code: Option<String>,
    pub date_text: Option<String>,
}

impl From<ProductDBResponse> for InventoryItemResponse {
    fn from(db: ProductDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            serial: db.serial,
            status: db.status,
            date_code: db.date_code,
            date_text: db.date_text,
        }
    }
}

/// Envelope for the inventory listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryResponse {
    pub products: Vec<InventoryItemResponse>,
}
