//! # Pricing Engine
//!
//! Turns weight, rate and making charges into subtotal, GST and total.
//!
//! ## Formula
//! ```text
//! subtotal   = gold_weight × gold_rate + making_charges
//! tax_amount = subtotal × tax_rate
//! total      = subtotal + tax_amount
//! ```
//!
//! ## Called Twice Per Sale
//! ```text
//! create sale ──► compute_amounts ──► total_amount (stored)
//!                                           │
//! render invoice ──► compute_amounts ──► subtotal, tax line items
//!                    (same stored inputs)   totals line = stored total
//! ```
//! Both calls must use this function with the same tax rate so the
//! re-derived line items add up to the stored total. No rounding happens
//! here; amounts are rounded to paise only when printed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{NewSale, Sale, TaxRate};

/// The result of pricing one sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Metal value plus making charges, before tax.
    pub subtotal: Money,
    /// GST on the subtotal.
    pub tax_amount: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

/// Computes the tax-inclusive price of a sale.
///
/// ## Errors
/// `CoreError::InvalidInput` when `weight <= 0`, `rate <= 0` or
/// `making_charges < 0`.
///
/// ## Example
/// ```rust
/// use jewel_core::pricing::compute_amounts;
/// use jewel_core::{Money, TaxRate};
/// use rust_decimal::Decimal;
///
/// let err = compute_amounts(
///     Decimal::ZERO,
///     Money::from_rupees(6000),
///     Money::zero(),
///     TaxRate::default(),
/// );
/// assert!(err.is_err());
/// ```
pub fn compute_amounts(
    weight: Decimal,
    rate: Money,
    making_charges: Money,
    tax_rate: TaxRate,
) -> CoreResult<PriceBreakdown> {
    if weight <= Decimal::ZERO {
        return Err(CoreError::invalid_input(
            "gold_weight",
            "must be greater than zero",
        ));
    }
    if !rate.is_positive() {
        return Err(CoreError::invalid_input(
            "gold_rate",
            "must be greater than zero",
        ));
    }
    if making_charges.is_negative() {
        return Err(CoreError::invalid_input(
            "making_charges",
            "must not be negative",
        ));
    }

    let too_large = || CoreError::invalid_input("total_amount", "amount is too large");

    let subtotal = rate
        .multiply_weight(weight)
        .and_then(|gold| gold.checked_add(making_charges))
        .ok_or_else(too_large)?;
    let tax_amount = subtotal.calculate_tax(tax_rate).ok_or_else(too_large)?;
    let total = subtotal.checked_add(tax_amount).ok_or_else(too_large)?;

    Ok(PriceBreakdown {
        subtotal,
        tax_amount,
        total,
    })
}

/// Prices a validated sale before it is stored.
pub fn price_new_sale(sale: &NewSale, tax_rate: TaxRate) -> CoreResult<PriceBreakdown> {
    compute_amounts(sale.gold_weight, sale.gold_rate, sale.making_charges, tax_rate)
}

/// Re-derives the breakdown of a stored sale from its stored inputs.
///
/// Never consults `sale.total_amount`.
pub fn reprice_sale(sale: &Sale, tax_rate: TaxRate) -> CoreResult<PriceBreakdown> {
    compute_amounts(sale.gold_weight, sale.gold_rate, sale.making_charges, tax_rate)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    const GST: TaxRate = TaxRate::from_bps(300);

    #[test]
    fn test_ring_scenario() {
        let amounts = compute_amounts(
            dec!(10),
            Money::from_rupees(6000),
            Money::from_rupees(500),
            GST,
        )
        .unwrap();

        assert_eq!(amounts.subtotal.amount(), dec!(60500));
        assert_eq!(amounts.tax_amount.amount(), dec!(1815));
        assert_eq!(amounts.total.amount(), dec!(62315));
    }

    #[test]
    fn test_fractional_weight_keeps_precision() {
        // 3.333 g × ₹6,001 = 20001.333; + 0 making; GST 600.03999
        let amounts =
            compute_amounts(dec!(3.333), Money::from_rupees(6001), Money::zero(), GST).unwrap();
        assert_eq!(amounts.subtotal.amount(), dec!(20001.333));
        assert_eq!(amounts.tax_amount.amount(), dec!(600.03999));
        assert_eq!(amounts.total.amount(), dec!(20601.37299));
    }

    #[test]
    fn test_zero_tax_rate() {
        let amounts = compute_amounts(
            dec!(1),
            Money::from_rupees(100),
            Money::from_rupees(10),
            TaxRate::zero(),
        )
        .unwrap();
        assert!(amounts.tax_amount.is_zero());
        assert_eq!(amounts.total, amounts.subtotal);
    }

    #[test]
    fn test_rejects_out_of_domain_inputs() {
        let rate = Money::from_rupees(6000);

        let err = compute_amounts(dec!(0), rate, Money::zero(), GST).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { ref field, .. } if field == "gold_weight"));

        let err = compute_amounts(dec!(-1), rate, Money::zero(), GST).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));

        let err = compute_amounts(dec!(1), Money::zero(), Money::zero(), GST).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { ref field, .. } if field == "gold_rate"));

        let err = compute_amounts(dec!(1), rate, Money::from_rupees(-1), GST).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidInput { ref field, .. } if field == "making_charges")
        );
    }

    #[test]
    fn test_overflow_is_invalid_input() {
        let huge = Money::from_decimal(Decimal::MAX);
        let err = compute_amounts(dec!(2), huge, Money::zero(), GST).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { ref field, .. } if field == "total_amount"));
    }

    fn positive_decimal() -> impl Strategy<Value = Decimal> {
        // 0.001 .. 100000.000 with three decimal places
        (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 3))
    }

    fn non_negative_decimal() -> impl Strategy<Value = Decimal> {
        (0i64..10_000_000i64).prop_map(|v| Decimal::new(v, 2))
    }

    proptest! {
        #[test]
        fn prop_total_is_subtotal_times_one_point_oh_three(
            weight in positive_decimal(),
            rate in positive_decimal(),
            making in non_negative_decimal(),
        ) {
            let amounts = compute_amounts(
                weight,
                Money::from_decimal(rate),
                Money::from_decimal(making),
                GST,
            ).unwrap();

            let subtotal = weight * rate + making;
            prop_assert_eq!(amounts.subtotal.amount(), subtotal);
            prop_assert_eq!(amounts.tax_amount.amount(), subtotal * dec!(0.03));
            prop_assert_eq!(amounts.total.amount(), subtotal * dec!(1.03));
        }

        #[test]
        fn prop_breakdown_sums_to_total(
            weight in positive_decimal(),
            rate in positive_decimal(),
            making in non_negative_decimal(),
            bps in 0u32..=10_000u32,
        ) {
            let amounts = compute_amounts(
                weight,
                Money::from_decimal(rate),
                Money::from_decimal(making),
                TaxRate::from_bps(bps),
            ).unwrap();
            prop_assert_eq!(amounts.subtotal + amounts.tax_amount, amounts.total);
        }
    }
}
