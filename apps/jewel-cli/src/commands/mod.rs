//! # Commands Module
//!
//! Every operation the CLI exposes. Each command takes the state it needs
//! and returns a serializable result or an [`ApiError`](crate::error::ApiError).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── sale.rs     ◄─── create_sale, list_sales
//! ├── invoice.rs  ◄─── get_invoice_document, get_invoice_text, save_invoice
//! └── status.rs   ◄─── get_status
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn list_sales(db: &DbState)
//!
//! // Needs both: tax rate for pricing, shop identity for invoices
//! async fn create_sale(db: &DbState, config: &ConfigState, form: SaleForm)
//! async fn get_invoice_document(db: &DbState, config: &ConfigState, id: i64)
//! ```

pub mod invoice;
pub mod sale;
pub mod status;
