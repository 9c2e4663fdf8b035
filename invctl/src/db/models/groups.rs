//! Database models for arrival groups.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api::models::products::ProductStatus;
use crate::types::{GroupId, ProductId};

/// One row of the grouped-listing join: group columns plus the columns of
/// the product matched by the join, all nullable on the product side.
#[derive(Debug, Clone, FromRow)]
pub struct GroupProductRow {
    pub id: GroupId,
    pub title_en: String,
    pub title_ru: String,
    /// Denormalized count stored on the group row. Not guaranteed to match
    /// the number of product rows actually joined.
    pub products: i32,
    pub date_code: String,
    pub date_text: String,
    pub usd: Option<String>,
    pub created_at: DateTime<Utc>,
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
    pub product_serial: Option<String>,
    pub product_status: Option<ProductStatus>,
    pub product_date_code: Option<String>,
    pub product_date_text: Option<String>,
    pub product_created_at: Option<DateTime<Utc>>,
}

/// The product attached to a group by the grouped listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedProductDBResponse {
    pub id: ProductId,
    pub name: String,
    pub serial: String,
    pub status: ProductStatus,
    pub date_code: Option<String>,
    pub date_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A group record as produced by the grouped listing: at most one related
/// product.
#[derive(Debug, Clone)]
pub struct GroupDBResponse {
    pub id: GroupId,
    pub title_en: String,
    pub title_ru: String,
    pub products: i32,
    pub date_code: String,
    pub date_text: String,
    pub usd: Option<String>,
    pub created_at: DateTime<Utc>,
    pub related_product: Option<RelatedProductDBResponse>,
}
