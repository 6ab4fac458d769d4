use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use thiserror::Error;

use billfold_core::{CompanyProfile, Invoice};

/// PDF generation failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 190.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 20.0;

// Items table column positions.
const COL_DESC: f32 = MARGIN_LEFT;
const COL_QTY: f32 = 115.0;
const COL_RATE: f32 = 140.0;
const COL_AMOUNT: f32 = 168.0;

/// Format a monetary value with thousands separators and two decimals.
/// No currency glyph: the builtin fonts only cover WinAnsi.
fn format_money(v: f64) -> String {
    let s = format!("{v:.2}");
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    let mut count = 0;
    for i in (0..digits.len()).rev() {
        if count == 3 && digits[i].is_ascii_digit() {
            grouped.push(',');
            count = 0;
        }
        grouped.push(digits[i]);
        count += 1;
    }
    let int_with_sep: String = grouped.chars().rev().collect();
    format!("{int_with_sep}.{dec_part}")
}

/// Writing position across pages; starts a fresh page when the cursor would
/// run past the bottom margin.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self { doc, layer, y: TOP_Y }
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_Y {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
    }

    fn text(&mut self, font: &IndirectFontRef, size: f32, x: f32, s: &str) {
        self.layer.use_text(s, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn rule(&mut self) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(self.y)), false),
                (Point::new(Mm(MARGIN_RIGHT), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }
}

/// Render the invoice as a single PDF document and return its bytes.
pub fn render_invoice(invoice: &Invoice, company: &CompanyProfile) -> Result<Vec<u8>, RenderError> {
    let (doc, page1, layer1) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut cur = Cursor::new(&doc, doc.get_page(page1).get_layer(layer1));

    // Company header.
    cur.text(&bold, 20.0, MARGIN_LEFT, &company.name);
    cur.advance(8.0);

    let contact: Vec<String> = [
        company.phone.as_ref().map(|p| format!("Phone: {p}")),
        company.email.as_ref().map(|e| format!("Email: {e}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        cur.text(&font, 10.0, MARGIN_LEFT, &contact.join(" | "));
        cur.advance(5.0);
    }
    if let Some(address) = &company.address {
        cur.text(&font, 10.0, MARGIN_LEFT, address);
        cur.advance(5.0);
    }
    if let Some(gstin) = &company.gstin {
        cur.text(&font, 10.0, MARGIN_LEFT, &format!("GSTIN: {gstin}"));
        cur.advance(5.0);
    }
    cur.advance(6.0);

    // Invoice header.
    cur.text(&bold, 16.0, 88.0, "INVOICE");
    cur.advance(8.0);
    cur.text(&font, 10.0, 70.0, &format!("Invoice No: {}", invoice.invoice_number));
    cur.advance(5.0);
    cur.text(
        &font,
        10.0,
        70.0,
        &format!("Date: {}", invoice.invoice_date.format("%d-%m-%Y")),
    );
    cur.advance(5.0);
    if let Some(due) = invoice.due_date {
        cur.text(&font, 10.0, 70.0, &format!("Due Date: {}", due.format("%d-%m-%Y")));
        cur.advance(5.0);
    }
    cur.advance(6.0);

    // Bill To block.
    if let Some(customer) = &invoice.customer {
        cur.text(&bold, 11.0, MARGIN_LEFT, "Bill To:");
        cur.advance(5.5);
        cur.text(&font, 10.0, MARGIN_LEFT, &customer.name);
        cur.advance(5.0);
        if let Some(mobile) = &customer.mobile {
            cur.text(&font, 10.0, MARGIN_LEFT, &format!("Mobile: {mobile}"));
            cur.advance(5.0);
        }
        if let Some(address) = &customer.address {
            cur.text(&font, 10.0, MARGIN_LEFT, address);
            cur.advance(5.0);
        }
        cur.advance(6.0);
    }

    // Items table.
    cur.ensure_room(20.0);
    cur.text(&bold, 11.0, COL_DESC, "Description");
    cur.text(&bold, 11.0, COL_QTY, "Quantity");
    cur.text(&bold, 11.0, COL_RATE, "Rate");
    cur.text(&bold, 11.0, COL_AMOUNT, "Amount");
    cur.advance(2.5);
    cur.rule();
    cur.advance(6.0);

    for item in &invoice.items {
        cur.ensure_room(6.0);
        cur.text(&font, 10.0, COL_DESC, &item.description);
        cur.text(&font, 10.0, COL_QTY, &format!("{:.2}", item.quantity));
        cur.text(&font, 10.0, COL_RATE, &format_money(item.rate));
        cur.text(&font, 10.0, COL_AMOUNT, &format_money(item.amount));
        cur.advance(6.0);
    }

    cur.rule();
    cur.advance(7.0);

    // Totals column, right-aligned region of the table.
    cur.ensure_room(30.0);
    cur.text(&font, 10.0, COL_RATE, "Subtotal:");
    cur.text(&font, 10.0, COL_AMOUNT, &format_money(invoice.subtotal));
    cur.advance(6.0);
    if invoice.discount > 0.0 {
        cur.text(&font, 10.0, COL_RATE, "Discount:");
        cur.text(&font, 10.0, COL_AMOUNT, &format_money(invoice.discount));
        cur.advance(6.0);
    }
    if invoice.gst_amount > 0.0 {
        cur.text(&font, 10.0, COL_RATE, &format!("GST ({}%):", invoice.gst_rate));
        cur.text(&font, 10.0, COL_AMOUNT, &format_money(invoice.gst_amount));
        cur.advance(6.0);
    }
    cur.text(&bold, 11.0, COL_RATE, "Total:");
    cur.text(&bold, 11.0, COL_AMOUNT, &format_money(invoice.total));
    cur.advance(10.0);

    // Payment type.
    cur.ensure_room(8.0);
    let payment = payment_label(invoice);
    cur.text(&bold, 10.0, MARGIN_LEFT, &format!("Payment Type: {payment}"));
    cur.advance(8.0);

    if let Some(notes) = &invoice.notes {
        cur.ensure_room(12.0);
        cur.text(&bold, 10.0, MARGIN_LEFT, "Notes:");
        cur.advance(5.0);
        for line in notes.lines() {
            cur.ensure_room(5.0);
            cur.text(&font, 10.0, MARGIN_LEFT, line);
            cur.advance(5.0);
        }
        cur.advance(4.0);
    }

    if let Some(terms) = &invoice.terms {
        cur.ensure_room(12.0);
        cur.text(&bold, 10.0, MARGIN_LEFT, "Terms & Conditions:");
        cur.advance(5.0);
        for line in terms.lines() {
            cur.ensure_room(5.0);
            cur.text(&font, 10.0, MARGIN_LEFT, line);
            cur.advance(5.0);
        }
        cur.advance(4.0);
    }

    if let Some(footer) = &company.footer_text {
        cur.ensure_room(12.0);
        cur.advance(6.0);
        cur.text(&font, 10.0, MARGIN_LEFT, footer);
    }

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

fn payment_label(invoice: &Invoice) -> &'static str {
    match invoice.payment_type {
        billfold_core::PaymentType::Cash => "Cash",
        billfold_core::PaymentType::Credit => "Credit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billfold_core::{Invoice, InvoiceItem, NewInvoice, PaymentType};
    use chrono::{TimeZone, Utc};

    fn company() -> CompanyProfile {
        CompanyProfile::placeholder(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap())
    }

    fn invoice(items: Vec<InvoiceItem>) -> Invoice {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let total: f64 = items.iter().map(|i| i.amount).sum();
        Invoice::issue(
            NewInvoice {
                payment_type: PaymentType::Cash,
                customer: None,
                items,
                subtotal: total,
                discount: 0.0,
                gst_rate: 0.0,
                gst_amount: 0.0,
                total,
                notes: Some("Payment received with thanks.".to_string()),
                terms: None,
                due_date: None,
            },
            "INV/2026/02/001".to_string(),
            now,
        )
    }

    fn item(n: usize) -> InvoiceItem {
        InvoiceItem {
            description: format!("Line item {n}"),
            quantity: 1.0,
            rate: 10.0,
            amount: 10.0,
        }
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(1_234_567.891), "1,234,567.89");
        assert_eq!(format_money(-1234.5), "-1,234.50");
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_invoice(&invoice(vec![item(1)]), &company()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn rendering_is_deterministic_for_identical_input() {
        let inv = invoice(vec![item(1), item(2)]);
        let a = render_invoice(&inv, &company()).unwrap();
        let b = render_invoice(&inv, &company()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn long_item_lists_spill_onto_extra_pages() {
        let short = render_invoice(&invoice(vec![item(1)]), &company()).unwrap();
        let long = render_invoice(&invoice((0..120).map(item).collect()), &company()).unwrap();
        assert!(long.starts_with(b"%PDF"));
        assert!(long.len() > short.len());
    }
}
