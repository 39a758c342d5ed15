//! # Sale Repository
//!
//! Store access for the `sales` table.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create(form, tax_rate)                                         │
//! │         ├── validate_sale_form()   ← no connection held yet            │
//! │         ├── price_new_sale()       ← total_amount fixed here           │
//! │         └── INSERT … RETURNING     ← id + sale_date from the store     │
//! │                                                                         │
//! │  2. READ (any number of times)                                         │
//! │     ├── get_by_id(id)   → Sale | NotFound                              │
//! │     └── list_all()      → newest first (id DESC)                       │
//! │                                                                         │
//! │  No update. No delete.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use jewel_core::pricing::price_new_sale;
use jewel_core::CoreError;
use jewel_core::validation::validate_sale_form;
use jewel_core::{Money, NewSale, Sale, SaleForm, TaxRate};

const SALE_COLUMNS: &str = "id, sale_date, customer_name, customer_phone, product_details, \
     gold_weight, gold_rate, making_charges, total_amount";

/// A `sales` row as SQLite returns it.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    sale_date: Option<NaiveDateTime>,
    customer_name: String,
    customer_phone: String,
    product_details: String,
    gold_weight: f64,
    gold_rate: f64,
    making_charges: f64,
    total_amount: f64,
}

impl SaleRow {
    fn into_sale(self) -> DbResult<Sale> {
        let id = self.id;
        let corrupt = |column: &str| DbError::CorruptRecord {
            id,
            reason: format!("{} is not a finite number", column),
        };

        let sale_date = self
            .sale_date
            .ok_or_else(|| DbError::CorruptRecord {
                id,
                reason: "sale_date is missing".to_string(),
            })?
            .and_utc();

        Ok(Sale {
            id,
            sale_date,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            product_details: self.product_details,
            gold_weight: Decimal::from_f64(self.gold_weight).ok_or_else(|| corrupt("gold_weight"))?,
            gold_rate: Money::from_f64(self.gold_rate).ok_or_else(|| corrupt("gold_rate"))?,
            making_charges: Money::from_f64(self.making_charges)
                .ok_or_else(|| corrupt("making_charges"))?,
            total_amount: Money::from_f64(self.total_amount)
                .ok_or_else(|| corrupt("total_amount"))?,
        })
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Validates, prices and stores a submitted billing form.
    ///
    /// ## Errors
    /// - `DbError::Invalid` for a bad form; nothing is written and no
    ///   connection is acquired
    /// - Any other `DbError` if the store fails; the single-statement insert
    ///   either lands completely or not at all
    pub async fn create(&self, form: &SaleForm, tax_rate: TaxRate) -> DbResult<Sale> {
        let new_sale = validate_sale_form(form)?;
        let amounts = price_new_sale(&new_sale, tax_rate)?;

        debug!(
            customer = %new_sale.customer_name,
            subtotal = %amounts.subtotal.amount(),
            tax = %amounts.tax_amount.amount(),
            total = %amounts.total.amount(),
            "Sale priced"
        );

        // Checked before any connection is taken: a value that cannot be read
        // back from REAL must never be committed
        let columns = RealColumns::new(&new_sale, amounts.total)?;

        let sale = self.insert(&new_sale, columns).await?;

        info!(sale_id = sale.id, total = %sale.total_amount, "Sale created");
        Ok(sale)
    }

    /// Inserts one row and reads back the store-assigned id and timestamp.
    async fn insert(&self, sale: &NewSale, columns: RealColumns) -> DbResult<Sale> {
        let sql = format!(
            "INSERT INTO sales (
                customer_name, customer_phone, product_details,
                gold_weight, gold_rate, making_charges, total_amount
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {}",
            SALE_COLUMNS
        );

        // Returned to the pool when dropped, including on the error path
        let mut conn = self.pool.acquire().await?;

        let row: SaleRow = sqlx::query_as(&sql)
            .bind(&sale.customer_name)
            .bind(&sale.customer_phone)
            .bind(&sale.product_details)
            .bind(columns.gold_weight)
            .bind(columns.gold_rate)
            .bind(columns.making_charges)
            .bind(columns.total_amount)
            .fetch_one(&mut *conn)
            .await?;

        row.into_sale()
    }

    /// Gets a sale by ID, or `None` when no such sale exists.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        debug!(sale_id = id, "Fetching sale");

        let sql = format!("SELECT {} FROM sales WHERE id = ?1", SALE_COLUMNS);

        let mut conn = self.pool.acquire().await?;
        let row: Option<SaleRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(SaleRow::into_sale).transpose()
    }

    /// Gets a sale by ID.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no sale has that id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Sale> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))
    }

    /// Lists every sale, newest first.
    ///
    /// Each call runs a fresh query and reflects the table as it is now.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sql = format!("SELECT {} FROM sales ORDER BY id DESC", SALE_COLUMNS);

        let mut conn = self.pool.acquire().await?;
        let rows: Vec<SaleRow> = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;

        debug!(count = rows.len(), "Listed sales");

        rows.into_iter().map(SaleRow::into_sale).collect()
    }

    /// Number of stored sales.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}

/// Numeric columns of a new row, as they will be written.
#[derive(Debug, Clone, Copy)]
struct RealColumns {
    gold_weight: f64,
    gold_rate: f64,
    making_charges: f64,
    total_amount: f64,
}

impl RealColumns {
    fn new(sale: &NewSale, total_amount: Money) -> DbResult<Self> {
        Ok(RealColumns {
            gold_weight: real(sale.gold_weight, "gold_weight")?,
            gold_rate: real(sale.gold_rate.amount(), "gold_rate")?,
            making_charges: real(sale.making_charges.amount(), "making_charges")?,
            total_amount: real(total_amount.amount(), "total_amount")?,
        })
    }
}

/// Converts to REAL, rejecting values that would not convert back.
fn real(value: Decimal, column: &str) -> DbResult<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite() && Decimal::from_f64(*v).is_some())
        .ok_or_else(|| CoreError::invalid_input(column, "amount is too large").into())
}

// =============================================================================
// Unit Tests
// =============================================================================
