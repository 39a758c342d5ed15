//! # jewel-core: Pure Business Logic for Jewel Billing
//!
//! This crate holds the billing rules of the shop as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Jewel Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 jewel-cli (Commands / Operator)                 │   │
//! │  │      create_sale, list_sales, get_invoice_document              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ jewel-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  invoice  │  │ validation│  │   │
//! │  │   │   Sale    │  │ subtotal  │  │ line items│  │ sale form │  │   │
//! │  │   │ SaleForm  │  │ GST total │  │  totals   │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    jewel-db (Database Layer)                    │   │
//! │  │               SQLite store, migrations, repository              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SaleForm, TaxRate)
//! - [`money`] - Decimal money type (no binary floating point)
//! - [`pricing`] - Subtotal / GST / total computation
//! - [`invoice`] - Invoice document built from a stored sale
//! - [`config`] - Explicit billing configuration (tax rate, shop identity)
//! - [`error`] - Domain error types
//! - [`validation`] - Sale form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use jewel_core::pricing::compute_amounts;
//! use jewel_core::{Money, TaxRate};
//! use rust_decimal::Decimal;
//!
//! let amounts = compute_amounts(
//!     Decimal::from(10),
//!     Money::from_rupees(6000),
//!     Money::from_rupees(500),
//!     TaxRate::from_bps(300),
//! )
//! .unwrap();
//!
//! assert_eq!(amounts.subtotal, Money::from_rupees(60500));
//! assert_eq!(amounts.tax_amount, Money::from_rupees(1815));
//! assert_eq!(amounts.total, Money::from_rupees(62315));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{BillingConfig, ShopIdentity};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{InvoiceDocument, InvoiceLine};
pub use money::Money;
pub use pricing::{compute_amounts, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST applied to jewelry sales, in basis points (3%).
pub const DEFAULT_GST_BPS: u32 = 300;

/// Maximum length of customer name and product description.
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum length of a customer phone number.
pub const MAX_PHONE_LEN: usize = 20;
