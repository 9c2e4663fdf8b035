//! API response model for the dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Entity counts shown on the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub groups_count: i64,
    pub products_count: i64,
}
