//! # Billing Configuration
//!
//! The tax rate and shop identity used to price sales and print invoices.
//!
//! Passed explicitly into pricing and invoice rendering, so a test can bill
//! at any rate and an invoice can say which rate it was rendered with.
//! Loading from files and environment lives in the application crate.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;
use crate::validation::validate_tax_rate_bps;

/// Shop details printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopIdentity {
    pub name: String,
    pub address_lines: Vec<String>,
}

impl Default for ShopIdentity {
    fn default() -> Self {
        ShopIdentity {
            name: "Your Shop Name".to_string(),
            address_lines: vec!["Your Address, Bengaluru, Karnataka".to_string()],
        }
    }
}

/// Billing configuration.
///
/// ## Defaults
/// - Tax: GST at 3%
/// - Currency: INR
/// - Shop: placeholder name and address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Tax applied to every sale subtotal.
    pub tax_rate: TaxRate,

    /// Name of the tax on invoice lines ("GST").
    pub tax_label: String,

    /// Currency code (ISO 4217) shown in the amount column header.
    pub currency_code: String,

    pub shop: ShopIdentity,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            tax_rate: TaxRate::default(),
            tax_label: "GST".to_string(),
            currency_code: "INR".to_string(),
            shop: ShopIdentity::default(),
        }
    }
}

impl BillingConfig {
    /// Returns a copy billing at a different tax rate.
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Checks that the configuration can produce a valid invoice.
    pub fn validate(&self) -> CoreResult<()> {
        validate_tax_rate_bps(self.tax_rate.bps())
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;

        if self.shop.name.trim().is_empty() {
            return Err(CoreError::InvalidConfig("shop name is required".into()));
        }

        if self.tax_label.trim().is_empty() {
            return Err(CoreError::InvalidConfig("tax label is required".into()));
        }

        Ok(())
    }

    /// Description of the tax line on an invoice, e.g. `GST (3%)`.
    pub fn tax_line_description(&self) -> String {
        format!("{} ({})", self.tax_label, self.tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BillingConfig::default();
        assert_eq!(config.tax_rate.bps(), 300);
        assert_eq!(config.tax_line_description(), "GST (3%)");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_excessive_tax_rate() {
        let config = BillingConfig::default().with_tax_rate(TaxRate::from_bps(10001));
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_blank_shop_name() {
        let mut config = BillingConfig::default();
        config.shop.name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: BillingConfig =
            serde_json::from_str(r#"{ "tax_rate": 150, "shop": { "name": "Lakshmi Jewellers" } }"#)
                .unwrap();
        assert_eq!(config.tax_line_description(), "GST (1.5%)");
        assert_eq!(config.shop.name, "Lakshmi Jewellers");
        assert_eq!(config.shop.address_lines.len(), 1);
        assert_eq!(config.currency_code, "INR");
    }
}
