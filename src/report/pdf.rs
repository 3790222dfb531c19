//! Paginated (PDF) report renderer.
//!
//! Walks a [`ReportModel`] and lays it out on A4 pages with the builtin
//! Helvetica fonts: title, generation date, summary table, then either
//! the flat bet table or the per-player sections depending on the
//! configured view. A simple y-cursor drives page breaks; the binary
//! encoding is entirely `printpdf`'s concern.

use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use tracing::debug;

use crate::config::ReportView;
use crate::report::model::{DisplayRow, ReportModel};
use crate::types::BetStatus;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 18.0;
const LINE_HEIGHT: f64 = 6.0;

/// Flat-table column x offsets (mm): player, game, selection, amount,
/// odd, status.
const FLAT_COLS: [f64; 6] = [18.0, 52.0, 92.0, 122.0, 148.0, 168.0];
/// Grouped-table column x offsets (mm): game, selection, amount, odd,
/// status, outcome.
const GROUP_COLS: [f64; 6] = [22.0, 60.0, 94.0, 120.0, 142.0, 168.0];

/// Render the report as PDF bytes.
pub fn render(model: &ReportModel, view: ReportView) -> Result<Vec<u8>> {
    let mut page = Page::new(&model.title)?;

    // Header block: centered-ish title, then the generation date.
    page.text(&model.title, 18.0, 55.0, true, Ink::Black);
    page.advance(10.0);
    let date = model.generated_at.format("%d/%m/%Y %H:%M");
    page.text(&format!("Date: {date}"), 10.0, MARGIN, false, Ink::Black);
    page.advance(LINE_HEIGHT * 2.0);

    // Summary table.
    page.text("Summary", 14.0, MARGIN, true, Ink::Black);
    page.advance(LINE_HEIGHT * 1.5);
    for (label, value) in &model.summary_rows {
        page.break_if_needed(LINE_HEIGHT);
        page.text(label, 10.0, MARGIN + 4.0, false, Ink::Black);
        page.text(value, 10.0, 110.0, false, Ink::Black);
        page.advance(LINE_HEIGHT);
    }
    page.advance(LINE_HEIGHT * 1.5);

    // Detail section, omitted entirely for an empty dataset.
    if !model.rows.is_empty() {
        match view {
            ReportView::Flat => flat_view(&mut page, model),
            ReportView::Grouped => grouped_view(&mut page, model),
        }
    }

    let bytes = page
        .doc
        .save_to_bytes()
        .context("Failed to serialize PDF document")?;
    debug!(bytes = bytes.len(), ?view, "PDF report rendered");
    Ok(bytes)
}

fn flat_view(page: &mut Page, model: &ReportModel) {
    page.break_if_needed(LINE_HEIGHT * 3.0);
    page.text("Bet Details", 14.0, MARGIN, true, Ink::Black);
    page.advance(LINE_HEIGHT * 1.5);

    let headers = ["Player", "Game", "Selection", "Amount", "Odd", "Status"];
    page.row(&FLAT_COLS, &headers, true, Ink::Black);

    for row in &model.rows {
        page.break_if_needed(LINE_HEIGHT);
        let cells = [
            clip(&row.player, 18),
            clip(&row.game, 22),
            clip(&row.selection, 16),
            row.amount.clone(),
            row.odd.clone(),
            row.status.clone(),
        ];
        page.row(&FLAT_COLS, &cells, false, status_ink(row));
    }
}

fn grouped_view(page: &mut Page, model: &ReportModel) {
    page.break_if_needed(LINE_HEIGHT * 3.0);
    page.text("Bets by Player", 14.0, MARGIN, true, Ink::Black);
    page.advance(LINE_HEIGHT * 1.5);

    for section in &model.players {
        page.break_if_needed(LINE_HEIGHT * 4.0);
        page.text(&section.player, 12.0, MARGIN, true, Ink::Black);
        page.advance(LINE_HEIGHT);
        let totals = format!(
            "Staked: {}   Exposure: {}   Won: {}   Lost: {}   Pending: {}",
            section.total_staked,
            section.total_possible_win,
            section.won_count,
            section.lost_count,
            section.pending_count,
        );
        page.text(&totals, 9.0, MARGIN + 4.0, false, Ink::Black);
        page.advance(LINE_HEIGHT * 1.5);

        let headers = ["Game", "Selection", "Amount", "Odd", "Status", "Outcome"];
        page.row(&GROUP_COLS, &headers, true, Ink::Black);

        for row in &section.rows {
            page.break_if_needed(LINE_HEIGHT);
            let cells = [
                clip(&row.game, 20),
                clip(&row.selection, 18),
                row.amount.clone(),
                row.odd.clone(),
                row.status.clone(),
                row.outcome.clone(),
            ];
            page.row(&GROUP_COLS, &cells, false, status_ink(row));
        }
        page.advance(LINE_HEIGHT);
    }
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Ink {
    Black,
    Green,
    Red,
}

/// Won rows print green, lost rows red, pending stays black.
fn status_ink(row: &DisplayRow) -> Ink {
    match row.status_kind {
        BetStatus::Won => Ink::Green,
        BetStatus::Lost => Ink::Red,
        BetStatus::Pending => Ink::Black,
    }
}

struct Page {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f64,
}

impl Page {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Failed to load builtin font")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Failed to load builtin bold font")?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: PAGE_HEIGHT - MARGIN - 6.0,
        })
    }

    fn text(&mut self, s: &str, size: f64, x: f64, bold: bool, ink: Ink) {
        let (r, g, b) = match ink {
            Ink::Black => (0.0, 0.0, 0.0),
            Ink::Green => (0.11, 0.48, 0.20),
            Ink::Red => (0.73, 0.13, 0.13),
        };
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        let font = if bold { &self.bold } else { &self.font };
        self.layer
            .use_text(s, size as f32, Mm(x as f32), Mm(self.y as f32), font);
    }

    /// Write one table row at the column offsets, then advance.
    fn row(&mut self, cols: &[f64; 6], cells: &[impl AsRef<str>; 6], bold: bool, ink: Ink) {
        for (x, cell) in cols.iter().zip(cells.iter()) {
            self.text(cell.as_ref(), if bold { 10.0 } else { 9.0 }, *x, bold, ink);
        }
        self.advance(LINE_HEIGHT);
    }

    fn advance(&mut self, dy: f64) {
        self.y -= dy;
    }

    fn break_if_needed(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN - 6.0;
        }
    }
}

/// Clip a cell to a maximum character count so columns stay readable.
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::report::model::build_report_model;
    use crate::types::Bet;
    use rust_decimal_macros::dec;

    fn model(bets: &[Bet]) -> ReportModel {
        build_report_model(&[], bets, &ReportConfig::default()).unwrap()
    }

    fn sample_bets() -> Vec<Bet> {
        let mut won = Bet::sample("Bob", BetStatus::Won);
        won.amount = dec!(10);
        let pending = Bet::sample("Bob", BetStatus::Pending);
        let lost = Bet::sample("Alice", BetStatus::Lost);
        vec![won, pending, lost]
    }

    #[test]
    fn test_flat_view_renders_pdf_bytes() {
        let bytes = render(&model(&sample_bets()), ReportView::Flat).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_grouped_view_renders_pdf_bytes() {
        let bytes = render(&model(&sample_bets()), ReportView::Grouped).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_dataset_still_renders() {
        let bytes = render(&model(&[]), ReportView::Flat).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_many_rows_paginate_without_panic() {
        let bets: Vec<Bet> = (0..200)
            .map(|i| {
                let mut b = Bet::sample(&format!("Player{i}"), BetStatus::Pending);
                b.id = format!("bet-{i}");
                b
            })
            .collect();
        let bytes = render(&model(&bets), ReportView::Grouped).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("exactly-ten", 11), "exactly-ten");
        let clipped = clip("a very long game name indeed", 10);
        assert_eq!(clipped.chars().count(), 10);
        assert!(clipped.ends_with('…'));
    }
}
