//! # Repository Module
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.sales().get_by_id(42)                                      │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── create(&self, form, tax_rate)                                     │
//! │  ├── find_by_id(&self, id) / get_by_id(&self, id)                      │
//! │  ├── list_all(&self)                                                   │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod sale;
