//! # PDF Invoice
//!
//! Draws an [`InvoiceDocument`] onto A4 pages.
//!
//! ## Page Layout (points, origin bottom-left)
//! ```text
//! ┌──────────────────────────────── 595 ────────────────────────────────┐
//! │ 50                      Your Shop Name (bold)                   545 │
//! │                Your Address, Bengaluru, Karnataka                   │
//! │                                                                     │
//! │ Invoice ID:  7                                                      │
//! │ Date:        05-03-2024                                             │
//! │ Customer:    Asha (9999999999)                                      │
//! │                                                                     │
//! │ Description                                           Amount (INR) │
//! │ ─────────────────────────────────────────────────────────────────── │
//! │ Ring (10g)                                               60,500.00 │
//! │ GST (3%)                                                  1,815.00 │
//! │ ─────────────────────────────────────────────────────────────────── │
//! │                                       Total              62,315.00 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layout and drawing are separate steps. [`layout`] places every run of
//! text and every rule, starting a new page when the cursor reaches the
//! bottom margin. [`render_pdf`] turns that into a PDF with `lopdf`.
//!
//! Text uses the standard Courier fonts, so widths are known without
//! embedding a font. Characters outside Latin-1 print as `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::ApiError;
use crate::printable::format_date;
use jewel_core::InvoiceDocument;

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 16.0;
const RULE_GAP: f32 = 6.0;

/// Courier advance width per point of font size.
const GLYPH_WIDTH: f32 = 0.6;

const RIGHT_EDGE: f32 = PAGE_WIDTH - MARGIN;
const VALUE_OFFSET: f32 = 90.0;
const AMOUNT_COLUMN: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Zero-based page index.
    pub page: usize,
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub size: f32,
    pub font: Font,
    pub text: String,
}

impl TextRun {
    pub fn width(&self) -> f32 {
        text_width(&self.text, self.size)
    }
}

/// A horizontal rule across the text column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub page: usize,
    pub y: f32,
}

/// Everything to draw, already split into pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub pages: usize,
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH
}

/// Top-down writing position.
struct Cursor {
    page: usize,
    y: f32,
    runs: Vec<TextRun>,
    rules: Vec<Rule>,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            page: 0,
            y: PAGE_HEIGHT - MARGIN,
            runs: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Moves down by `height` and returns the new baseline, breaking the
    /// page first if the line would cross the bottom margin.
    fn next_line(&mut self, height: f32) -> f32 {
        if self.y - height < MARGIN {
            self.page += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= height;
        self.y
    }

    fn text(&mut self, x: f32, y: f32, size: f32, font: Font, text: impl Into<String>) {
        self.runs.push(TextRun {
            page: self.page,
            x,
            y,
            size,
            font,
            text: text.into(),
        });
    }

    fn centered(&mut self, size: f32, font: Font, text: &str) {
        let y = self.next_line(size.max(BODY_SIZE) + 4.0);
        let x = ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN);
        self.text(x, y, size, font, text);
    }

    fn right_aligned(&mut self, y: f32, font: Font, text: &str) {
        let x = RIGHT_EDGE - text_width(text, BODY_SIZE);
        self.text(x, y, BODY_SIZE, font, text);
    }

    fn labelled(&mut self, label: &str, value: &str) {
        let y = self.next_line(LINE_HEIGHT);
        self.text(MARGIN, y, BODY_SIZE, Font::Bold, label);
        self.text(MARGIN + VALUE_OFFSET, y, BODY_SIZE, Font::Regular, value);
    }

    fn rule(&mut self) {
        let y = self.next_line(RULE_GAP);
        self.rules.push(Rule { page: self.page, y });
    }

    fn gap(&mut self) {
        self.next_line(LINE_HEIGHT / 2.0);
    }
}

/// Characters of description that fit left of the amount column.
fn description_chars() -> usize {
    ((RIGHT_EDGE - MARGIN - AMOUNT_COLUMN) / (BODY_SIZE * GLYPH_WIDTH)) as usize
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks: Vec<String> = chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect();
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

/// Places the invoice on pages.
pub fn layout(doc: &InvoiceDocument) -> PdfLayout {
    let mut cursor = Cursor::new();

    // Header
    cursor.centered(TITLE_SIZE, Font::Bold, &doc.shop.name);
    for address in &doc.shop.address_lines {
        cursor.centered(BODY_SIZE, Font::Regular, address);
    }
    cursor.gap();

    // Invoice details
    cursor.labelled("Invoice ID:", &doc.invoice_id.to_string());
    cursor.labelled("Date:", &format_date(&doc.sale_date));
    cursor.labelled(
        "Customer:",
        &format!("{} ({})", doc.customer_name, doc.customer_phone),
    );
    cursor.gap();

    // Table
    let y = cursor.next_line(LINE_HEIGHT);
    cursor.text(MARGIN, y, BODY_SIZE, Font::Bold, "Description");
    cursor.right_aligned(y, Font::Bold, &format!("Amount ({})", doc.currency_code));
    cursor.rule();

    for line in &doc.lines {
        let chunks = wrap(&line.description, description_chars());
        let last = chunks.len() - 1;
        for (i, chunk) in chunks.into_iter().enumerate() {
            let y = cursor.next_line(LINE_HEIGHT);
            cursor.text(MARGIN, y, BODY_SIZE, Font::Regular, chunk);
            if i == last {
                cursor.right_aligned(y, Font::Regular, &line.amount.to_grouped_string());
            }
        }
    }
    cursor.rule();

    let y = cursor.next_line(LINE_HEIGHT);
    cursor.text(
        RIGHT_EDGE - AMOUNT_COLUMN - text_width("Total", BODY_SIZE),
        y,
        BODY_SIZE,
        Font::Bold,
        "Total",
    );
    cursor.right_aligned(y, Font::Bold, &doc.total.to_grouped_string());

    PdfLayout {
        pages: cursor.page + 1,
        runs: cursor.runs,
        rules: cursor.rules,
    }
}

/// Latin-1 bytes for the standard fonts; anything wider becomes `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

impl PdfLayout {
    fn page_content(&self, page: usize) -> Content {
        let mut operations = Vec::new();

        for run in self.runs.iter().filter(|run| run.page == page) {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![run.font.resource().into(), Object::Real(run.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(run.x), Object::Real(run.y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(latin1(&run.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        for rule in self.rules.iter().filter(|rule| rule.page == page) {
            operations.push(Operation::new("w", vec![Object::Real(0.5)]));
            operations.push(Operation::new(
                "m",
                vec![Object::Real(MARGIN), Object::Real(rule.y)],
            ));
            operations.push(Operation::new(
                "l",
                vec![Object::Real(RIGHT_EDGE), Object::Real(rule.y)],
            ));
            operations.push(Operation::new("S", vec![]));
        }

        Content { operations }
    }
}

fn pdf_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::internal(format!("cannot build invoice PDF: {}", err))
}

fn font(base: &'static str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Renders the invoice as PDF bytes.
pub fn render_pdf(doc: &InvoiceDocument) -> Result<Vec<u8>, ApiError> {
    let layout = layout(doc);

    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular_id = pdf.add_object(font("Courier"));
    let bold_id = pdf.add_object(font("Courier-Bold"));
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages);
    for page in 0..layout.pages {
        let content = layout.page_content(page).encode().map_err(pdf_error)?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(layout.pages as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    pdf.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes).map_err(pdf_error)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use jewel_core::invoice::render;
    use jewel_core::{BillingConfig, Money, Sale};
    use rust_decimal_macros::dec;

    fn ring_invoice() -> InvoiceDocument {
        let sale = Sale {
            id: 7,
            sale_date: Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap(),
            customer_name: "Asha".into(),
            customer_phone: "9999999999".into(),
            product_details: "Ring".into(),
            gold_weight: dec!(10),
            gold_rate: Money::from_rupees(6000),
            making_charges: Money::from_rupees(500),
            total_amount: Money::from_rupees(62315),
        };
        render(&sale, &BillingConfig::default()).unwrap()
    }

    fn run<'a>(layout: &'a PdfLayout, text: &str) -> &'a TextRun {
        layout.runs.iter().find(|run| run.text == text).unwrap()
    }

    /// Every string shown on a page, read back from the saved file.
    fn shown_text(bytes: &[u8]) -> Vec<String> {
        let pdf = Document::load_mem(bytes).unwrap();
        let mut shown = Vec::new();
        for (_, page_id) in pdf.get_pages() {
            let data = pdf.get_page_content(page_id).unwrap();
            let content = Content::decode(&data).unwrap();
            for operation in content.operations {
                if operation.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = operation.operands.first() {
                        shown.push(String::from_utf8_lossy(bytes).to_string());
                    }
                }
            }
        }
        shown
    }

    #[test]
    fn test_ring_invoice_is_one_page_pdf() {
        let bytes = render_pdf(&ring_invoice()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let pdf = Document::load_mem(&bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), 1);
    }

    #[test]
    fn test_pdf_shows_invoice_fields() {
        let shown = shown_text(&render_pdf(&ring_invoice()).unwrap());

        for expected in [
            "Your Shop Name",
            "Invoice ID:",
            "7",
            "05-03-2024",
            "Asha (9999999999)",
            "Amount (INR)",
            "Ring (10g)",
            "60,500.00",
            "GST (3%)",
            "1,815.00",
            "Total",
            "62,315.00",
        ] {
            assert!(shown.iter().any(|s| s == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_amounts_end_at_right_margin() {
        let layout = layout(&ring_invoice());

        for amount in ["60,500.00", "1,815.00", "62,315.00", "Amount (INR)"] {
            let run = run(&layout, amount);
            assert!((run.x + run.width() - RIGHT_EDGE).abs() < 0.01, "{}", amount);
        }

        // Amount shares the baseline of its description
        assert_eq!(run(&layout, "Ring (10g)").y, run(&layout, "60,500.00").y);
        assert_eq!(run(&layout, "Total").y, run(&layout, "62,315.00").y);
    }

    #[test]
    fn test_runs_stay_inside_margins() {
        let layout = layout(&ring_invoice());
        assert_eq!(layout.pages, 1);
        assert_eq!(layout.rules.len(), 2);

        for run in &layout.runs {
            assert!(run.y >= MARGIN && run.y <= PAGE_HEIGHT - MARGIN, "{:?}", run);
            assert!(run.x >= MARGIN, "{:?}", run);
        }

        // Top to bottom: shop name, then details, then the total
        let name = run(&layout, "Your Shop Name");
        let date = run(&layout, "05-03-2024");
        let total = run(&layout, "62,315.00");
        assert!(name.y > date.y && date.y > total.y);
        assert_eq!(name.font, Font::Bold);
    }

    #[test]
    fn test_long_document_breaks_pages() {
        let mut doc = ring_invoice();
        doc.shop.address_lines = (1..=80).map(|i| format!("Address line {}", i)).collect();

        let layout = layout(&doc);
        assert!(layout.pages > 1);
        assert!(layout
            .runs
            .iter()
            .all(|run| run.y >= MARGIN && run.y <= PAGE_HEIGHT - MARGIN));
        assert_eq!(run(&layout, "62,315.00").page, layout.pages - 1);

        let bytes = render_pdf(&doc).unwrap();
        let pdf = Document::load_mem(&bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), layout.pages);
    }

    #[test]
    fn test_long_description_wraps() {
        let mut doc = ring_invoice();
        doc.lines[0].description =
            "Antique temple necklace with ruby and emerald drops, hand finished (10g)".into();

        let layout = layout(&doc);
        let first = run(&layout, "Antique temple necklace with ruby and emerald drops,");
        let rest = run(&layout, " hand finished (10g)");
        let amount = run(&layout, "60,500.00");
        assert!(rest.y < first.y);
        assert_eq!(amount.y, rest.y);
    }

    #[test]
    fn test_latin1_fallback() {
        assert_eq!(latin1("Café"), b"Caf\xe9".to_vec());
        assert_eq!(latin1("₹ 100"), b"? 100".to_vec());
    }
}
