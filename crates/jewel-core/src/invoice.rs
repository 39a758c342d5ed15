//! # Invoice Renderer
//!
//! Builds the structured invoice for a stored sale. Layout (fonts, pages,
//! currency grouping, date format) is left to the caller.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shop name / address                                                    │
//! │  Invoice ID, Date, Customer (phone)                                     │
//! │                                                                         │
//! │  Description                                   Amount                   │
//! │  ───────────────────────────────────────────   ──────────               │
//! │  <product_details> (<weight>g)                 subtotal   ◄─ re-derived │
//! │  GST (3%)                                      tax_amount ◄─ re-derived │
//! │  Total                                         total      ◄─ STORED     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The line items are recomputed from the sale's stored weight, rate and
//! making charges. The totals line is always the stored `total_amount`.
//! If the configured tax rate has changed since the sale was created, the
//! line items no longer add up to the total; [`InvoiceDocument::drift`]
//! exposes the difference instead of hiding it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{BillingConfig, ShopIdentity};
use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::reprice_sale;
use crate::types::Sale;

/// One priced row of the invoice table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub amount: Money,
}

/// The structured invoice for a single sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub invoice_id: i64,
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub shop: ShopIdentity,
    pub currency_code: String,
    /// Product line then tax line, in that order.
    pub lines: Vec<InvoiceLine>,
    /// The sale's stored `total_amount`.
    pub total: Money,
}

impl InvoiceDocument {
    /// Sum of the line items (the re-derived total).
    pub fn line_total(&self) -> Money {
        self.lines.iter().map(|line| line.amount).sum()
    }

    /// Stored total minus re-derived total. Zero unless the tax rate changed.
    pub fn drift(&self) -> Money {
        self.total - self.line_total()
    }

    /// Suggested file stem for a downloaded copy (`invoice_42`).
    pub fn file_stem(&self) -> String {
        format!("invoice_{}", self.invoice_id)
    }
}

/// Renders the invoice for a stored sale.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use jewel_core::invoice::render;
/// use jewel_core::{BillingConfig, Money, Sale};
/// use rust_decimal::Decimal;
///
/// let sale = Sale {
///     id: 1,
///     sale_date: Utc::now(),
///     customer_name: "Asha".into(),
///     customer_phone: "9999999999".into(),
///     product_details: "Ring".into(),
///     gold_weight: Decimal::from(10),
///     gold_rate: Money::from_rupees(6000),
///     making_charges: Money::from_rupees(500),
///     total_amount: Money::from_rupees(62315),
/// };
///
/// let doc = render(&sale, &BillingConfig::default()).unwrap();
/// assert_eq!(doc.lines[0].description, "Ring (10g)");
/// assert_eq!(doc.lines[1].description, "GST (3%)");
/// assert_eq!(doc.total, Money::from_rupees(62315));
/// ```
pub fn render(sale: &Sale, config: &BillingConfig) -> CoreResult<InvoiceDocument> {
    let amounts = reprice_sale(sale, config.tax_rate)?;

    let lines = vec![
        InvoiceLine {
            description: format!(
                "{} ({}g)",
                sale.product_details,
                sale.gold_weight.normalize()
            ),
            amount: amounts.subtotal,
        },
        InvoiceLine {
            description: config.tax_line_description(),
            amount: amounts.tax_amount,
        },
    ];

    Ok(InvoiceDocument {
        invoice_id: sale.id,
        sale_date: sale.sale_date,
        customer_name: sale.customer_name.clone(),
        customer_phone: sale.customer_phone.clone(),
        shop: config.shop.clone(),
        currency_code: config.currency_code.clone(),
        lines,
        total: sale.total_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::TaxRate;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ring_sale() -> Sale {
        Sale {
            id: 7,
            sale_date: Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap(),
            customer_name: "Asha".into(),
            customer_phone: "9999999999".into(),
            product_details: "Ring".into(),
            gold_weight: dec!(10.0),
            gold_rate: Money::from_rupees(6000),
            making_charges: Money::from_rupees(500),
            total_amount: Money::from_rupees(62315),
        }
    }

    #[test]
    fn test_ring_invoice_lines() {
        let doc = render(&ring_sale(), &BillingConfig::default()).unwrap();

        assert_eq!(doc.invoice_id, 7);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[0].description, "Ring (10g)");
        assert_eq!(doc.lines[0].amount.to_grouped_string(), "60,500.00");
        assert_eq!(doc.lines[1].description, "GST (3%)");
        assert_eq!(doc.lines[1].amount.to_grouped_string(), "1,815.00");
        assert_eq!(doc.total.to_grouped_string(), "62,315.00");
        assert!(doc.drift().is_zero());
        assert_eq!(doc.file_stem(), "invoice_7");
    }

    #[test]
    fn test_fractional_weight_description() {
        let mut sale = ring_sale();
        sale.gold_weight = dec!(10.50);
        let doc = render(&sale, &BillingConfig::default()).unwrap();
        assert_eq!(doc.lines[0].description, "Ring (10.5g)");
    }

    #[test]
    fn test_totals_line_uses_stored_total() {
        // Stored total deliberately off by a paisa: the invoice must show it as stored
        let mut sale = ring_sale();
        sale.total_amount = Money::from_decimal(dec!(62315.01));
        let doc = render(&sale, &BillingConfig::default()).unwrap();
        assert_eq!(doc.total.amount(), dec!(62315.01));
        assert_eq!(doc.drift().amount(), dec!(0.01));
    }

    #[test]
    fn test_changed_tax_rate_shows_drift() {
        let config = BillingConfig::default().with_tax_rate(TaxRate::from_bps(500));
        let doc = render(&ring_sale(), &config).unwrap();
        assert_eq!(doc.lines[1].description, "GST (5%)");
        assert_eq!(doc.total, Money::from_rupees(62315));
        assert_eq!(doc.drift().amount(), dec!(-1210));
    }

    #[test]
    fn test_corrupt_stored_inputs_fail() {
        let mut sale = ring_sale();
        sale.gold_weight = dec!(0);
        assert!(matches!(
            render(&sale, &BillingConfig::default()),
            Err(CoreError::InvalidInput { .. })
        ));
    }
}
