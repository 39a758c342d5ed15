//! # Domain Types
//!
//! Core domain types used throughout Jewel Billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    SaleForm     │──►│    NewSale      │──►│      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw text of    │   │  validated,     │   │  id (store)     │       │
//! │  │  the submitted  │   │  typed fields   │   │  sale_date      │       │
//! │  │  billing form   │   │                 │   │  total_amount   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  300 = 3% GST   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::DEFAULT_GST_BPS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 300 bps = 3% (GST on gold jewelry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage such as `3` or `1.5`.
    ///
    /// Returns `None` for negative values or anything finer than a basis point.
    ///
    /// ```rust
    /// use jewel_core::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(TaxRate::from_percentage(Decimal::from(3)), Some(TaxRate::from_bps(300)));
    /// assert_eq!(TaxRate::from_percentage(Decimal::new(1234, 3)), None); // 1.234%
    /// ```
    pub fn from_percentage(pct: Decimal) -> Option<Self> {
        let bps = pct.checked_mul(Decimal::ONE_HUNDRED)?;
        if !bps.fract().is_zero() {
            return None;
        }
        bps.to_u32().map(TaxRate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (`0.03` for 3%).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage without trailing zeros (`3`, `1.5`).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2).normalize()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// GST at 3% unless configured otherwise.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(DEFAULT_GST_BPS)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Sale Form
// =============================================================================

/// The billing form exactly as submitted: every field is raw text.
///
/// Numeric fields are parsed during validation so that a non-numeric entry
/// surfaces as a `ValidationError` rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub product_details: String,
    /// Grams.
    pub gold_weight: String,
    /// Rupees per gram.
    pub gold_rate: String,
    /// Flat fee in rupees.
    pub making_charges: String,
}

// =============================================================================
// New Sale
// =============================================================================

/// A validated sale ready for pricing and insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub customer_name: String,
    pub customer_phone: String,
    pub product_details: String,
    pub gold_weight: Decimal,
    pub gold_rate: Money,
    pub making_charges: Money,
}

// =============================================================================
// Sale
// =============================================================================

/// One persisted billing transaction.
///
/// Created once, never updated. `total_amount` is the legal record of what
/// was charged and is never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Assigned by the store on insert.
    pub id: i64,
    /// Assigned by the store on insert (UTC).
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub product_details: String,
    /// Grams.
    pub gold_weight: Decimal,
    /// Rupees per gram.
    pub gold_rate: Money,
    pub making_charges: Money,
    /// Tax-inclusive total computed at creation time.
    pub total_amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
