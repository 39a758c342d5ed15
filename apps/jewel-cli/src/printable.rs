//! # Printable Invoice
//!
//! Fixed-width text layout of an [`InvoiceDocument`].
//!
//! ```text
//!                          Your Shop Name
//!                Your Address, Bengaluru, Karnataka
//!
//! Invoice ID:  7
//! Date:        05-03-2024
//! Customer:    Asha (9999999999)
//!
//! Description                                         Amount (INR)
//! ----------------------------------------------------------------
//! Ring (10g)                                             60,500.00
//! GST (3%)                                                1,815.00
//! ----------------------------------------------------------------
//!                                            Total       62,315.00
//! ```

use chrono::{DateTime, Utc};
use jewel_core::InvoiceDocument;

use crate::commands::sale::SaleRow;

/// Characters per printed line.
pub const PAGE_WIDTH: usize = 64;

const AMOUNT_WIDTH: usize = 16;
const DESCRIPTION_WIDTH: usize = PAGE_WIDTH - AMOUNT_WIDTH;
const LABEL_WIDTH: usize = 13;

/// Formats a sale date for invoices and listings (`05-03-2024`).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Lays out the invoice as plain text, one `\n`-terminated line per row.
pub fn render_text(doc: &InvoiceDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push(centered(&doc.shop.name));
    for address in &doc.shop.address_lines {
        lines.push(centered(address));
    }
    lines.push(String::new());

    // Invoice details
    lines.push(labelled("Invoice ID:", &doc.invoice_id.to_string()));
    lines.push(labelled("Date:", &format_date(&doc.sale_date)));
    lines.push(labelled(
        "Customer:",
        &format!("{} ({})", doc.customer_name, doc.customer_phone),
    ));
    lines.push(String::new());

    // Table
    lines.push(format!(
        "{:<desc$}{:>amt$}",
        "Description",
        format!("Amount ({})", doc.currency_code),
        desc = DESCRIPTION_WIDTH,
        amt = AMOUNT_WIDTH
    ));
    lines.push(rule());
    for line in &doc.lines {
        lines.extend(table_row(&line.description, &line.amount.to_grouped_string()));
    }
    lines.push(rule());
    lines.push(format!(
        "{:>desc$}{:>amt$}",
        "Total",
        doc.total.to_grouped_string(),
        desc = DESCRIPTION_WIDTH - 8,
        amt = AMOUNT_WIDTH + 8
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Lays out the sales report as a text table.
pub fn render_sales_table(rows: &[SaleRow]) -> String {
    if rows.is_empty() {
        return "No sales recorded.\n".to_string();
    }

    let mut text = format!(
        "{:>5}  {:<10}  {:<20}  {:<12}  {:<20}  {:>14}\n",
        "ID", "Date", "Customer", "Phone", "Product", "Total"
    );
    for row in rows {
        text.push_str(&format!(
            "{:>5}  {:<10}  {:<20}  {:<12}  {:<20}  {:>14}\n",
            row.id,
            row.date,
            clip(&row.customer_name, 20),
            clip(&row.customer_phone, 12),
            clip(&row.product_details, 20),
            row.total_amount
        ));
    }
    text
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width - 1).collect();
    clipped.push('~');
    clipped
}

fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = PAGE_WIDTH)
        .trim_end()
        .to_string()
}

fn labelled(label: &str, value: &str) -> String {
    format!("{:<width$}{}", label, value, width = LABEL_WIDTH)
}

fn rule() -> String {
    "-".repeat(PAGE_WIDTH)
}

/// A description/amount row. Descriptions longer than their column wrap;
/// the amount sits on the last line.
fn table_row(description: &str, amount: &str) -> Vec<String> {
    let width = DESCRIPTION_WIDTH - 2;
    let chars: Vec<char> = description.chars().collect();
    let mut chunks: Vec<String> = chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect();
    if chunks.is_empty() {
        chunks.push(String::new());
    }

    let last = chunks.len() - 1;
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i == last {
                format!(
                    "{:<desc$}{:>amt$}",
                    chunk,
                    amount,
                    desc = DESCRIPTION_WIDTH,
                    amt = AMOUNT_WIDTH
                )
            } else {
                chunk
            }
        })
        .collect()
}
