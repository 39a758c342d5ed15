//! # Invoice Commands
//!
//! Produces the printable invoice for a stored sale.
//!
//! ```text
//! get_invoice_document(42)
//!      │
//!      ├── sales().get_by_id(42)      NotFound → ApiError NOT_FOUND
//!      ├── invoice::render(sale, cfg) line items re-derived, total stored
//!      └── pdf::render_pdf()          A4 pages
//!      │
//!      ▼
//! InvoiceFile { "invoice_42.pdf", application/pdf, inline, body }
//! ```
//!
//! `get_invoice_text` lays out the same document as fixed-width text for
//! the terminal.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::pdf::render_pdf;
use crate::printable::render_text;
use crate::state::{ConfigState, DbState};
use jewel_core::invoice::render;
use jewel_core::InvoiceDocument;

pub const INVOICE_CONTENT_TYPE: &str = "application/pdf";
pub const INVOICE_DISPOSITION: &str = "inline";

/// A rendered invoice ready to show or save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFile {
    /// `invoice_<id>.pdf`
    pub filename: String,
    pub content_type: String,
    /// Shown in place rather than offered as an attachment.
    pub disposition: String,
    pub body: Vec<u8>,
}

async fn load_invoice(
    db: &DbState,
    config: &ConfigState,
    id: i64,
) -> Result<InvoiceDocument, ApiError> {
    let sale = db.inner().sales().get_by_id(id).await?;
    let doc = render(&sale, &config.billing)?;

    let drift = doc.drift();
    if !drift.round_to_paise().is_zero() {
        warn!(
            sale_id = id,
            drift = %drift,
            tax_rate = %config.billing.tax_rate,
            "Invoice line items do not add up to the stored total"
        );
    }

    Ok(doc)
}

/// Renders the invoice for sale `id` as a PDF.
pub async fn get_invoice_document(
    db: &DbState,
    config: &ConfigState,
    id: i64,
) -> Result<InvoiceFile, ApiError> {
    debug!(sale_id = id, "get_invoice_document command");

    let doc = load_invoice(db, config, id).await?;

    Ok(InvoiceFile {
        filename: format!("{}.pdf", doc.file_stem()),
        content_type: INVOICE_CONTENT_TYPE.to_string(),
        disposition: INVOICE_DISPOSITION.to_string(),
        body: render_pdf(&doc)?,
    })
}

/// Renders the invoice for sale `id` as fixed-width text.
pub async fn get_invoice_text(
    db: &DbState,
    config: &ConfigState,
    id: i64,
) -> Result<String, ApiError> {
    debug!(sale_id = id, "get_invoice_text command");

    let doc = load_invoice(db, config, id).await?;
    Ok(render_text(&doc))
}

/// Writes the invoice body into `dir` under its filename.
pub fn save_invoice(file: &InvoiceFile, dir: &Path) -> Result<PathBuf, ApiError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ApiError::internal(format!("cannot create {}: {}", dir.display(), e)))?;

    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.body)
        .map_err(|e| ApiError::internal(format!("cannot write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Invoice saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sale::create_sale;
    use crate::error::ErrorCode;
    use jewel_core::{SaleForm, TaxRate};

    fn ring_form() -> SaleForm {
        SaleForm {
            customer_name: "Asha".into(),
            customer_phone: "9999999999".into(),
            product_details: "Ring".into(),
            gold_weight: "10".into(),
            gold_rate: "6000".into(),
            making_charges: "500".into(),
        }
    }

    #[tokio::test]
    async fn test_invoice_file_for_ring() {
        let db = DbState::in_memory().await.unwrap();
        let config = ConfigState::default();
        let created = create_sale(&db, &config, ring_form()).await.unwrap();

        let file = get_invoice_document(&db, &config, created.sale_id).await.unwrap();

        assert_eq!(file.filename, format!("invoice_{}.pdf", created.sale_id));
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.disposition, "inline");
        assert!(file.body.starts_with(b"%PDF-"));

        let pdf = lopdf::Document::load_mem(&file.body).unwrap();
        assert_eq!(pdf.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_invoice_text_for_ring() {
        let db = DbState::in_memory().await.unwrap();
        let config = ConfigState::default();
        let created = create_sale(&db, &config, ring_form()).await.unwrap();

        let text = get_invoice_text(&db, &config, created.sale_id).await.unwrap();
        assert!(text.contains("60,500.00"));
        assert!(text.contains("1,815.00"));
        assert!(text.contains("62,315.00"));
    }

    #[tokio::test]
    async fn test_invoice_total_survives_rate_change() {
        let db = DbState::in_memory().await.unwrap();
        let created = create_sale(&db, &ConfigState::default(), ring_form())
            .await
            .unwrap();

        let mut later = ConfigState::default();
        later.billing = later.billing.with_tax_rate(TaxRate::from_bps(500));
        let text = get_invoice_text(&db, &later, created.sale_id).await.unwrap();

        assert!(text.contains("GST (5%)"));
        assert!(text.contains("3,025.00"));
        let total_line = text.lines().last().unwrap();
        assert!(total_line.ends_with("62,315.00"));

        // The PDF still renders with the drifted line items
        let file = get_invoice_document(&db, &later, created.sale_id).await.unwrap();
        assert!(file.body.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_unknown_sale_is_not_found() {
        let db = DbState::in_memory().await.unwrap();
        let err = get_invoice_document(&db, &ConfigState::default(), 404)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Sale not found: 404");

        let err = get_invoice_text(&db, &ConfigState::default(), 404)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_save_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let file = InvoiceFile {
            filename: "invoice_3.pdf".into(),
            content_type: INVOICE_CONTENT_TYPE.into(),
            disposition: INVOICE_DISPOSITION.into(),
            body: b"%PDF-1.5\n".to_vec(),
        };

        let path = save_invoice(&file, &dir.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "invoice_3.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.5\n".to_vec());
    }
}
