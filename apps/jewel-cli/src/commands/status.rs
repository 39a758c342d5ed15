//! # Status Command
//!
//! Reports store health and the configuration in effect.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub database_path: String,
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub sale_count: i64,
    /// e.g. `GST (3%)`
    pub tax: String,
    pub shop_name: String,
}

pub async fn get_status(db: &DbState, config: &ConfigState) -> Result<StatusResponse, ApiError> {
    debug!("get_status command");

    let database = db.inner();
    let healthy = database.health_check().await;
    let (migrations_total, migrations_applied) = database.migration_status().await?;
    let sale_count = database.sales().count().await?;

    Ok(StatusResponse {
        database_path: config.database_path().display().to_string(),
        healthy,
        migrations_total,
        migrations_applied,
        sale_count,
        tax: config.billing.tax_line_description(),
        shop_name: config.billing.shop.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_of_fresh_store() {
        let db = DbState::in_memory().await.unwrap();
        let config = ConfigState::default().with_database_path(":memory:");

        let status = get_status(&db, &config).await.unwrap();
        assert!(status.healthy);
        assert_eq!(status.migrations_total, status.migrations_applied);
        assert_eq!(status.sale_count, 0);
        assert_eq!(status.tax, "GST (3%)");
        assert_eq!(status.database_path, ":memory:");
    }
}
