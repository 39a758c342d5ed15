//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Gold is priced per gram with fractional weights (10.35g × ₹6,012.50)  │
//! │  so integer paise alone cannot hold the exact product either.          │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    10.35 × 6012.50 = 62229.375 exactly                                 │
//! │    Rounded to paise ONLY when printed, never in computation            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jewel_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let rate = Money::from_rupees(6000);
//! let value = rate.multiply_weight(Decimal::new(105, 1)).unwrap(); // 10.5 g
//! assert_eq!(value, Money::from_rupees(63000));
//! assert_eq!(value.to_grouped_string(), "63,000.00");
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount held at full decimal precision.
///
/// ## Where Money is Used
/// ```text
/// gold_rate × gold_weight ──► + making_charges ──► subtotal
///                                                     │
///                         subtotal × GST ◄────────────┤
///                                                     ▼
///                                         total_amount (stored)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-rupee amount.
    ///
    /// ```rust
    /// use jewel_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(500).to_grouped_string(), "500.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Converts a stored REAL column back into money.
    ///
    /// Returns `None` for NaN or infinite values. The shortest decimal that
    /// round-trips the float is used, so `0.1_f64` becomes exactly `0.1`.
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64(value).map(Money)
    }

    /// Converts to a float for storage in a REAL column.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a per-gram rate by a weight in grams.
    ///
    /// ```rust
    /// use jewel_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Money::from_rupees(6000);
    /// assert_eq!(rate.multiply_weight(Decimal::from(10)), Some(Money::from_rupees(60000)));
    /// assert_eq!(Money::from_decimal(Decimal::MAX).multiply_weight(Decimal::TWO), None);
    /// ```
    ///
    /// Returns `None` on overflow.
    #[inline]
    pub fn multiply_weight(&self, grams: Decimal) -> Option<Self> {
        self.0.checked_mul(grams).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Calculates tax at full precision.
    ///
    /// No rounding happens here: the result is re-derived later from the
    /// same stored inputs, and rounding twice would let the two derivations
    /// disagree by a paisa.
    ///
    /// ```rust
    /// use jewel_core::money::Money;
    /// use jewel_core::types::TaxRate;
    ///
    /// let tax = Money::from_rupees(60500).calculate_tax(TaxRate::from_bps(300));
    /// assert_eq!(tax, Some(Money::from_rupees(1815)));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Rounds to paise using Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding
    /// ```text
    /// 0.125 → 0.12   0.135 → 0.14   0.145 → 0.14
    /// ```
    /// Presentation only. Stored and computed amounts keep full precision.
    pub fn round_to_paise(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Formats with thousands separators and exactly two decimals.
    ///
    /// ```rust
    /// use jewel_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(62315).to_grouped_string(), "62,315.00");
    /// assert_eq!(Money::from_rupees(-1234567).to_grouped_string(), "-1,234,567.00");
    /// ```
    pub fn to_grouped_string(&self) -> String {
        let mut rounded = self.round_to_paise().0.abs();
        rounded.rescale(2);
        let plain = rounded.to_string();

        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.round_to_paise().is_negative() { "-" } else { "" };
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable rupee amount (`₹62,315.00`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grouped = self.to_grouped_string();
        match grouped.strip_prefix('-') {
            Some(unsigned) => write!(f, "-₹{}", unsigned),
            None => write!(f, "₹{}", grouped),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_rupees(62315)), "₹62,315.00");
        assert_eq!(format!("{}", Money::from_decimal(dec!(5.5))), "₹5.50");
        assert_eq!(format!("{}", Money::from_decimal(dec!(-550.25))), "-₹550.25");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(Money::from_rupees(0).to_grouped_string(), "0.00");
        assert_eq!(Money::from_rupees(999).to_grouped_string(), "999.00");
        assert_eq!(Money::from_rupees(1000).to_grouped_string(), "1,000.00");
        assert_eq!(Money::from_rupees(60500).to_grouped_string(), "60,500.00");
        assert_eq!(
            Money::from_decimal(dec!(1234567.891)).to_grouped_string(),
            "1,234,567.89"
        );
    }

    #[test]
    fn test_bankers_rounding() {
        assert_eq!(Money::from_decimal(dec!(0.125)).round_to_paise().amount(), dec!(0.12));
        assert_eq!(Money::from_decimal(dec!(0.135)).round_to_paise().amount(), dec!(0.14));
        // Tiny negative values round to zero and print unsigned
        assert_eq!(Money::from_decimal(dec!(-0.001)).to_grouped_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_decimal(dec!(500.50));

        assert_eq!((a + b).amount(), dec!(1500.50));
        assert_eq!((a - b).amount(), dec!(499.50));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.amount(), dec!(2001.00));
    }

    #[test]
    fn test_tax_keeps_full_precision() {
        // ₹333.33 at 3% = ₹9.9999, not rounded
        let tax = Money::from_decimal(dec!(333.33)).calculate_tax(TaxRate::from_bps(300)).unwrap();
        assert_eq!(tax.amount(), dec!(9.9999));
    }

    #[test]
    fn test_multiply_weight() {
        let rate = Money::from_decimal(dec!(6012.50));
        assert_eq!(rate.multiply_weight(dec!(10.35)).unwrap().amount(), dec!(62229.375));
    }

    #[test]
    fn test_float_round_trip() {
        let m = Money::from_f64(0.1).unwrap();
        assert_eq!(m.amount(), dec!(0.1));
        assert_eq!(Money::from_f64(62315.0).unwrap(), Money::from_rupees(62315));
        assert!(Money::from_f64(f64::NAN).is_none());
        assert_eq!(Money::from_rupees(62315).to_f64(), Some(62315.0));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_rupees(1).is_positive());
        assert!(Money::from_rupees(-1).is_negative());
        assert_eq!(Money::from_rupees(-5).abs(), Money::from_rupees(5));
    }
}
