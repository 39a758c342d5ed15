//! # Sale Commands

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::printable::format_date;
use crate::state::{ConfigState, DbState};
use jewel_core::{Money, Sale, SaleForm};

/// View a caller should show after a successful save.
pub const REPORTS_VIEW: &str = "reports";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResponse {
    pub sale_id: i64,
    pub total_amount: Money,
    pub redirect_to: String,
}

/// One row of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRow {
    pub id: i64,
    /// `dd-mm-yyyy`
    pub date: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub product_details: String,
    /// Grouped with two decimals, e.g. `62,315.00`
    pub total_amount: String,
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        SaleRow {
            id: sale.id,
            date: format_date(&sale.sale_date),
            customer_name: sale.customer_name.clone(),
            customer_phone: sale.customer_phone.clone(),
            product_details: sale.product_details.clone(),
            total_amount: sale.total_amount.to_grouped_string(),
        }
    }
}

/// Prices and stores a submitted billing form at the configured tax rate.
pub async fn create_sale(
    db: &DbState,
    config: &ConfigState,
    form: SaleForm,
) -> Result<CreateSaleResponse, ApiError> {
    debug!(customer = %form.customer_name, "create_sale command");

    let sale = db
        .inner()
        .sales()
        .create(&form, config.billing.tax_rate)
        .await?;

    info!(sale_id = sale.id, total = %sale.total_amount, "Sale saved");

    Ok(CreateSaleResponse {
        sale_id: sale.id,
        total_amount: sale.total_amount,
        redirect_to: REPORTS_VIEW.to_string(),
    })
}

/// Lists all sales, newest first.
pub async fn list_sales(db: &DbState) -> Result<Vec<SaleRow>, ApiError> {
    debug!("list_sales command");

    let sales = db.inner().sales().list_all().await?;
    Ok(sales.iter().map(SaleRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn form(name: &str) -> SaleForm {
        SaleForm {
            customer_name: name.into(),
            customer_phone: "9999999999".into(),
            product_details: "Ring".into(),
            gold_weight: "10".into(),
            gold_rate: "6000".into(),
            making_charges: "500".into(),
        }
    }

    #[tokio::test]
    async fn test_create_sale_response() {
        let db = DbState::in_memory().await.unwrap();
        let config = ConfigState::default();

        let response = create_sale(&db, &config, form("Asha")).await.unwrap();
        assert_eq!(response.sale_id, 1);
        assert_eq!(response.total_amount, Money::from_rupees(62315));
        assert_eq!(response.redirect_to, "reports");
    }

    #[tokio::test]
    async fn test_create_sale_rejects_bad_form() {
        let db = DbState::in_memory().await.unwrap();
        let mut bad = form("Asha");
        bad.gold_rate = "six thousand".into();

        let err = create_sale(&db, &ConfigState::default(), bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_sales(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_sales_rows() {
        let db = DbState::in_memory().await.unwrap();
        let config = ConfigState::default();
        create_sale(&db, &config, form("A")).await.unwrap();
        create_sale(&db, &config, form("B")).await.unwrap();

        let rows = list_sales(&db).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_name, "B");
        assert_eq!(rows[1].customer_name, "A");
        assert_eq!(rows[0].total_amount, "62,315.00");
        assert_eq!(rows[0].date.len(), 10);
    }
}
