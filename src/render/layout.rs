//! Invoice page layout
//!
//! Lays an [`InvoiceDocument`] out into a display list at the fixed page
//! width (595 device-independent pixels, ISO A4 width at 72dpi). Vertical
//! flow is computed here; the rasterizer only executes commands. Column
//! positions mirror the preview: a header row, a two-column from/to grid,
//! the items table (1fr / 80 / 140 columns, 16px gutters), the totals
//! block and a two-column footer.

use crate::model::InvoiceDocument;
use crate::totals;

use super::paint::{PaintCommand, Rgb};
use super::{Palette, MIN_PAGE_HEIGHT, PAGE_WIDTH};

/// Horizontal advance of one glyph cell at scale 1.
pub const GLYPH_ADVANCE: u32 = 8;
/// Glyph cell height at scale 1.
pub const GLYPH_HEIGHT: u32 = 8;

/// Page padding on all sides.
const PAD: u32 = 32;
/// Body line spacing.
const LINE: u32 = 18;

const CONTENT_W: u32 = PAGE_WIDTH - 2 * PAD; // 531
const RIGHT_EDGE: u32 = PAGE_WIDTH - PAD; // 563

// Items table: description 1fr, quantity 80, price 140, 16px gaps.
const DESC_W: u32 = CONTENT_W - 16 - 80 - 16 - 140; // 279
const QTY_CENTER: u32 = PAD + DESC_W + 16 + 40; // 367
// Totals rows right-align their value boxes (140 / 240 wide, 32 gap).
const TAX_LABEL_EDGE: u32 = RIGHT_EDGE - 140 - 32;
const TOTAL_LABEL_EDGE: u32 = RIGHT_EDGE - 240 - 32;
// Second column of the from/to and footer grids.
const COL_W: u32 = (CONTENT_W - 32) / 2; // 249
const COL2_X: u32 = PAD + COL_W + 32; // 313

/// Rendered width of a text run.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale
}

/// Greedy word wrap against a character budget per line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct PageBuilder {
    cmds: Vec<PaintCommand>,
    y: u32,
}

impl PageBuilder {
    fn text(&mut self, x: u32, y: u32, text: impl Into<String>, scale: u32, color: Rgb) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(PaintCommand::Text {
            x: x as i32,
            y: y as i32,
            text,
            scale,
            color,
        });
    }

    fn text_right(&mut self, right: u32, y: u32, text: impl Into<String>, scale: u32, color: Rgb) {
        let text = text.into();
        let x = right.saturating_sub(text_width(&text, scale));
        self.text(x, y, text, scale, color);
    }

    fn text_center(&mut self, center: u32, y: u32, text: impl Into<String>, scale: u32, color: Rgb) {
        let text = text.into();
        let x = center.saturating_sub(text_width(&text, scale) / 2);
        self.text(x, y, text, scale, color);
    }

    /// Horizontal rule spanning the content area.
    fn rule(&mut self, y: u32, color: Rgb) {
        self.cmds.push(PaintCommand::Rect {
            x: PAD as i32,
            y: y as i32,
            width: CONTENT_W,
            height: 1,
            color,
        });
    }

    /// Muted label followed inline by a value; returns the x after the pair.
    fn pair(&mut self, x: u32, label: &str, value: &str, palette: &Palette) -> u32 {
        self.text(x, self.y, label, 1, palette.muted);
        let vx = x + text_width(label, 1);
        self.text(vx, self.y, value, 1, palette.text);
        vx + text_width(value, 1)
    }
}

/// Lay out the whole invoice. Returns the display list and the page
/// height (content-driven, floored at [`MIN_PAGE_HEIGHT`]).
pub fn layout_invoice(doc: &InvoiceDocument, palette: &Palette) -> (Vec<PaintCommand>, u32) {
    let currency = doc.currency();
    let sums = totals::compute(&doc.items, doc.tax_rate);

    let mut page = PageBuilder {
        cmds: Vec::new(),
        y: PAD,
    };

    // Header row: invoice number, issue date, optional due date.
    let mut x = page.pair(PAD, "Invoice NO: ", &doc.invoice_number, palette);
    x = page.pair(
        x + 32,
        "Issue date: ",
        &doc.issue_date.format("%Y-%m-%d").to_string(),
        palette,
    );
    if let Some(due) = doc.due_date {
        page.pair(x + 32, "Due date: ", &due.format("%Y-%m-%d").to_string(), palette);
    }
    page.y += GLYPH_HEIGHT + 32;

    // From / To grid.
    let block_top = page.y;
    party_block(&mut page, PAD, block_top, "From", &doc.from, palette);
    let h2 = party_block(&mut page, COL2_X, block_top, "To", &doc.to, palette);
    page.y = block_top + h2 + 32;

    // Items table header.
    page.text(PAD, page.y, "Item", 1, palette.muted);
    page.text_center(QTY_CENTER, page.y, "Quantity", 1, palette.muted);
    page.text_right(RIGHT_EDGE, page.y, "Price", 1, palette.muted);
    page.y += GLYPH_HEIGHT + 8;
    page.rule(page.y, palette.border);
    page.y += 1 + 8;

    // Item rows, in document order.
    let desc_budget = (DESC_W / GLYPH_ADVANCE) as usize;
    for item in &doc.items {
        let lines = wrap(&item.description, desc_budget);
        let row_top = page.y;
        for (i, line) in lines.iter().enumerate() {
            page.text(PAD, row_top + i as u32 * LINE, line.clone(), 1, palette.text);
        }
        page.text_center(QTY_CENTER, row_top, item.quantity.to_string(), 1, palette.text);
        page.text_right(
            RIGHT_EDGE,
            row_top,
            totals::format_currency(item.price, currency),
            1,
            palette.text,
        );
        page.y = row_top + lines.len() as u32 * LINE + 10;
    }
    page.y += 22;

    // Totals block.
    page.rule(page.y, palette.border);
    page.y += 1 + 16;
    page.text_right(TAX_LABEL_EDGE, page.y, "Sales tax", 1, palette.muted);
    page.text_right(
        RIGHT_EDGE,
        page.y,
        totals::format_currency(sums.tax, currency),
        1,
        palette.text,
    );
    page.y += GLYPH_HEIGHT + 12;
    page.text_right(TOTAL_LABEL_EDGE, page.y + 4, "Total", 1, palette.muted);
    page.text_right(
        RIGHT_EDGE,
        page.y,
        totals::format_currency(sums.total, currency),
        2,
        palette.text,
    );
    page.y += 2 * GLYPH_HEIGHT + 48;

    // Footer: payment details and note.
    let footer_top = page.y;
    page.text(PAD, footer_top, "Payment details", 1, palette.muted);
    let mut fy = footer_top + GLYPH_HEIGHT + 8;
    for line in [
        format!("Bank: {}", doc.payment_details.bank),
        format!("Account number: {},", doc.payment_details.account_number),
        format!("Iban: {},", doc.payment_details.iban),
    ] {
        page.text(PAD, fy, line, 1, palette.text);
        fy += LINE;
    }

    page.text(COL2_X, footer_top, "Note", 1, palette.muted);
    let note = if doc.note.is_empty() {
        "Thanks for great collaboration"
    } else {
        doc.note.as_str()
    };
    let mut ny = footer_top + GLYPH_HEIGHT + 8;
    for line in wrap(note, (COL_W / GLYPH_ADVANCE) as usize) {
        page.text(COL2_X, ny, line, 1, palette.text);
        ny += LINE;
    }

    page.y = fy.max(ny) + PAD;
    let height = page.y.max(MIN_PAGE_HEIGHT);
    (page.cmds, height)
}

/// One party column; returns its height.
fn party_block(
    page: &mut PageBuilder,
    x: u32,
    top: u32,
    title: &str,
    party: &crate::model::CompanyInfo,
    palette: &Palette,
) -> u32 {
    page.text(x, top, title, 1, palette.muted);
    let mut y = top + GLYPH_HEIGHT + 8;
    page.text(x, y, party.name.clone(), 1, palette.text);
    y += LINE;
    for detail in [
        party.email.as_str(),
        party.phone.as_str(),
        party.address.as_str(),
        party.city.as_str(),
    ] {
        page.text(x, y, detail.to_string(), 1, palette.company_detail);
        y += LINE;
    }
    page.text(x, y, format!("VAT ID: {}", party.vat_id), 1, palette.company_detail);
    y += LINE;
    y - top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;
    use crate::render::palette;

    #[test]
    fn layout_meets_minimum_height() {
        let doc = InvoiceDocument::default();
        let (cmds, height) = layout_invoice(&doc, &palette(Theme::Dark));
        assert!(height >= MIN_PAGE_HEIGHT);
        assert!(!cmds.is_empty());
    }

    #[test]
    fn layout_is_deterministic() {
        let doc = InvoiceDocument::default();
        let pal = palette(Theme::Light);
        let (a, ha) = layout_invoice(&doc, &pal);
        let (b, hb) = layout_invoice(&doc, &pal);
        assert_eq!(a, b);
        assert_eq!(ha, hb);
    }

    #[test]
    fn layout_contains_header_and_totals_text() {
        let doc = InvoiceDocument::default();
        let (cmds, _) = layout_invoice(&doc, &palette(Theme::Dark));
        let texts: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Invoice NO: "));
        assert!(texts.contains(&"INV-01"));
        assert!(texts.contains(&"Sales tax"));
        assert!(texts.contains(&"Payment details"));
        // default note text when none is set
        assert!(texts.contains(&"Thanks for great collaboration"));
    }

    #[test]
    fn price_column_is_right_aligned() {
        let doc = InvoiceDocument::default();
        let (cmds, _) = layout_invoice(&doc, &palette(Theme::Dark));
        let price = totals::format_currency(100.0, "USD");
        let found = cmds.iter().any(|c| match c {
            PaintCommand::Text { x, text, scale, .. } => {
                *text == price && (*x as u32 + text_width(text, *scale)) == RIGHT_EDGE
            }
            _ => false,
        });
        assert!(found, "price run should end at the right content edge");
    }

    #[test]
    fn long_descriptions_wrap() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
    }
}
