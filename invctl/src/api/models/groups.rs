//! API request/response models for arrival groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::products::ProductStatus;
use crate::db::models::groups::{GroupDBResponse, RelatedProductDBResponse};
use crate::types::{GroupId, ProductId};

/// The single product attached to a group in the grouped listing.
/// Clients receive it under the `relatedProduct` key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelatedProductResponse {
    pub id: ProductId,
    pub name: String,
    pub serial: String,
    pub status: ProductStatus,
    pub date_code: Option<String>,
    pub date_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<RelatedProductDBResponse> for RelatedProductResponse {
    fn from(db: RelatedProductDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            serial: db.serial,
            status: db.status,
            date_code: db.date_code,
            date_text: db.date_text,
            created_at: db.created_at,
        }
    }
}

/// An arrival group in the grouped listing. `products` is the
/// denormalized count stored on the group row; it is reported as stored,
/// independent of whether a `relatedProduct` is attached.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    pub id: GroupId,
    pub title_en: String,
    pub title_ru: String,
    pub products: i32,
    pub date_code: String,
    pub date_text: String,
    pub usd: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "relatedProduct", skip_serializing_if = "Option::is_none")]
    pub related_product: Option<RelatedProductResponse>,
}

impl From<GroupDBResponse> for GroupResponse {
    fn from(db: GroupDBResponse) -> Self {
        Self {
            id: db.id,
            title_en: db.title_en,
            title_ru: db.title_ru,
            products: db.products,
            date_code: db.date_code,
            date_text: db.date_text,
            usd: db.usd,
            created_at: db.created_at,
            related_product: db.related_product.map(RelatedProductResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_related_product_key_is_camel_case() {
        let group = GroupResponse {
            id: 1,
            title_en: "Arrival 1".to_string(),
            title_ru: "Приход 1".to_string(),
            products: 2,
            date_code: "2403".to_string(),
            date_text: "March 2024".to_string(),
            usd: Some("120.00".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            related_product: Some(RelatedProductResponse {
                id: 1,
                name: "Scanner".to_string(),
                serial: "SN-1".to_string(),
                status: ProductStatus::Free,
                date_code: None,
                date_text: None,
                created_at: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            }),
        };

        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("relatedProduct").is_some());
        assert_eq!(json["title_en"], "Arrival 1");
        assert_eq!(json["products"], 2);
        assert_eq!(json["relatedProduct"]["status"], "Free");
    }

    #[test]
    fn test_missing_related_product_is_omitted() {
        let group = GroupResponse {
            id: 1,
            title_en: "Arrival 1".to_string(),
            title_ru: "Приход 1".to_string(),
            products: 0,
            date_code: "2403".to_string(),
            date_text: "March 2024".to_string(),
            usd: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            related_product: None,
        };

        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("relatedProduct").is_none());
        assert!(json["usd"].is_null());
    }
}
