//! # Validation Module
//!
//! Sale form validation for Jewel Billing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (form / CLI flags)                                    │
//! │  └── Raw text collected into SaleForm                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / length checks on text fields                           │
//! │  └── Decimal parsing + sign checks on numeric fields                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints                                              │
//! │                                                                         │
//! │  Nothing reaches the store until layer 2 passes.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jewel_core::validation::validate_sale_form;
//! use jewel_core::SaleForm;
//!
//! let form = SaleForm {
//!     customer_name: "Asha".into(),
//!     customer_phone: "9999999999".into(),
//!     product_details: "Ring".into(),
//!     gold_weight: "10".into(),
//!     gold_rate: "6000".into(),
//!     making_charges: "500".into(),
//! };
//! let sale = validate_sale_form(&form).unwrap();
//! assert_eq!(sale.gold_weight.to_string(), "10");
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewSale, SaleForm};
use crate::{MAX_PHONE_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-form text field.
///
/// ## Rules
/// - Trimmed before checking
/// - Must not be empty
/// - Must not exceed `max` characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a decimal number from form text.
///
/// Accepts plain (`10.5`) and scientific (`1e3`) notation.
pub fn parse_decimal(field: &str, value: &str) -> ValidationResult<Decimal> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: trimmed.to_string(),
        })
}

/// Parses a strictly positive decimal (weight, rate).
///
/// ```rust
/// use jewel_core::validation::parse_positive;
///
/// assert!(parse_positive("gold_weight", "10.25").is_ok());
/// assert!(parse_positive("gold_weight", "0").is_err());
/// assert!(parse_positive("gold_weight", "-1").is_err());
/// ```
pub fn parse_positive(field: &str, value: &str) -> ValidationResult<Decimal> {
    let parsed = parse_decimal(field, value)?;

    if parsed <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(parsed)
}

/// Parses a decimal that may be zero but not negative (making charges).
pub fn parse_non_negative(field: &str, value: &str) -> ValidationResult<Decimal> {
    let parsed = parse_decimal(field, value)?;

    if parsed < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(parsed)
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a submitted billing form and converts it to typed fields.
///
/// ## Flow
/// ```text
/// SaleForm (raw text)
///      │
///      ├── customer_name   → required, ≤ 200 chars
///      ├── customer_phone  → required, ≤ 20 chars
///      ├── product_details → required, ≤ 200 chars
///      ├── gold_weight     → decimal > 0
///      ├── gold_rate       → decimal > 0
///      └── making_charges  → decimal ≥ 0
///      │
///      ▼
/// NewSale (typed) or the first ValidationError in field order
/// ```
pub fn validate_sale_form(form: &SaleForm) -> ValidationResult<NewSale> {
    let customer_name = validate_required_text("customer_name", &form.customer_name, MAX_TEXT_LEN)?;
    let customer_phone =
        validate_required_text("customer_phone", &form.customer_phone, MAX_PHONE_LEN)?;
    let product_details =
        validate_required_text("product_details", &form.product_details, MAX_TEXT_LEN)?;

    let gold_weight = parse_positive("gold_weight", &form.gold_weight)?;
    let gold_rate = parse_positive("gold_rate", &form.gold_rate)?;
    let making_charges = parse_non_negative("making_charges", &form.making_charges)?;

    Ok(NewSale {
        customer_name,
        customer_phone,
        product_details,
        gold_weight,
        gold_rate: Money::from_decimal(gold_rate),
        making_charges: Money::from_decimal(making_charges),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form() -> SaleForm {
        SaleForm {
            customer_name: "  Asha ".into(),
            customer_phone: "9999999999".into(),
            product_details: "Ring".into(),
            gold_weight: "10".into(),
            gold_rate: "6000".into(),
            making_charges: "500".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let sale = validate_sale_form(&form()).unwrap();
        assert_eq!(sale.customer_name, "Asha");
        assert_eq!(sale.gold_weight, dec!(10));
        assert_eq!(sale.gold_rate, Money::from_rupees(6000));
        assert_eq!(sale.making_charges, Money::from_rupees(500));
    }

    #[test]
    fn test_zero_making_charges_allowed() {
        let mut f = form();
        f.making_charges = "0".into();
        assert!(validate_sale_form(&f).is_ok());
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut f = form();
        f.customer_phone = "   ".into();
        assert_eq!(
            validate_sale_form(&f).unwrap_err(),
            ValidationError::Required {
                field: "customer_phone".into()
            }
        );
    }

    #[test]
    fn test_long_text_rejected() {
        let mut f = form();
        f.product_details = "A".repeat(MAX_TEXT_LEN + 1);
        assert!(matches!(
            validate_sale_form(&f),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut f = form();
        f.gold_weight = "0".into();
        assert_eq!(
            validate_sale_form(&f).unwrap_err(),
            ValidationError::MustBePositive {
                field: "gold_weight".into()
            }
        );
    }

    #[test]
    fn test_negative_making_rejected() {
        let mut f = form();
        f.making_charges = "-1".into();
        assert_eq!(
            validate_sale_form(&f).unwrap_err(),
            ValidationError::MustBeNonNegative {
                field: "making_charges".into()
            }
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut f = form();
        f.gold_rate = "six thousand".into();
        assert!(matches!(
            validate_sale_form(&f),
            Err(ValidationError::InvalidNumber { .. })
        ));

        f.gold_rate = "".into();
        assert!(matches!(
            validate_sale_form(&f),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_decimal_notations() {
        assert_eq!(parse_decimal("w", " 10.50 ").unwrap(), dec!(10.50));
        assert_eq!(parse_decimal("w", "1e3").unwrap(), dec!(1000));
        assert!(parse_decimal("w", "NaN").is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(300).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
