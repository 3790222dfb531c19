//! Flow-document (Word) report renderer.
//!
//! Same model walk as the PDF adapter, emitted as .docx paragraphs and
//! tables via `docx-rs`: heading, right-aligned generation date, summary
//! table, then the configured view. Won/lost rows carry green/red runs.

use anyhow::{Context, Result};
use docx_rs::{AlignmentType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::io::Cursor;
use tracing::debug;

use crate::config::ReportView;
use crate::report::model::{DisplayRow, ReportModel};
use crate::types::BetStatus;

const GREEN: &str = "1B7A33";
const RED: &str = "BA2121";

/// Render the report as .docx bytes.
pub fn render(model: &ReportModel, view: ReportView) -> Result<Vec<u8>> {
    let mut doc = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(model.title.as_str()).bold().size(36))
                .align(AlignmentType::Center),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(format!(
                    "Date: {}",
                    model.generated_at.format("%d/%m/%Y %H:%M")
                )))
                .align(AlignmentType::Right),
        )
        .add_paragraph(heading("Summary"));

    let summary_rows = model
        .summary_rows
        .iter()
        .map(|(label, value)| {
            TableRow::new(vec![
                cell(label, false, None),
                cell(value, false, None),
            ])
        })
        .collect();
    doc = doc.add_table(Table::new(summary_rows));

    // Detail section, omitted entirely for an empty dataset.
    if !model.rows.is_empty() {
        doc = match view {
            ReportView::Flat => flat_view(doc, model),
            ReportView::Grouped => grouped_view(doc, model),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buffer)
        .context("Failed to serialize Word document")?;
    let bytes = buffer.into_inner();
    debug!(bytes = bytes.len(), ?view, "Word report rendered");
    Ok(bytes)
}

fn flat_view(doc: Docx, model: &ReportModel) -> Docx {
    let mut rows = vec![header_row(&[
        "Player", "Game", "Selection", "Amount", "Odd", "Status",
    ])];
    for row in &model.rows {
        let color = status_color(row);
        rows.push(TableRow::new(vec![
            cell(&row.player, false, None),
            cell(&row.game, false, None),
            cell(&row.selection, false, None),
            cell(&row.amount, false, None),
            cell(&row.odd, false, None),
            cell(&row.status, false, color),
        ]));
    }
    doc.add_paragraph(heading("Bet Details"))
        .add_table(Table::new(rows))
}

fn grouped_view(mut doc: Docx, model: &ReportModel) -> Docx {
    doc = doc.add_paragraph(heading("Bets by Player"));
    for section in &model.players {
        doc = doc
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(section.player.as_str()).bold().size(26)),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(format!(
                "Staked: {}   Exposure: {}   Won: {}   Lost: {}   Pending: {}",
                section.total_staked,
                section.total_possible_win,
                section.won_count,
                section.lost_count,
                section.pending_count,
            ))));

        let mut rows = vec![header_row(&[
            "Game", "Selection", "Amount", "Odd", "Status", "Outcome",
        ])];
        for row in &section.rows {
            let color = status_color(row);
            rows.push(TableRow::new(vec![
                cell(&row.game, false, None),
                cell(&row.selection, false, None),
                cell(&row.amount, false, None),
                cell(&row.odd, false, None),
                cell(&row.status, false, color),
                cell(&row.outcome, false, color),
            ]));
        }
        doc = doc
            .add_table(Table::new(rows))
            .add_paragraph(Paragraph::new());
    }
    doc
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(30))
}

fn header_row(titles: &[&str; 6]) -> TableRow {
    TableRow::new(titles.iter().map(|t| cell(t, true, None)).collect())
}

fn cell(text: &str, bold: bool, color: Option<&str>) -> TableCell {
    let mut run = Run::new().add_text(text);
    if bold {
        run = run.bold();
    }
    if let Some(c) = color {
        run = run.color(c);
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

fn status_color(row: &DisplayRow) -> Option<&'static str> {
    match row.status_kind {
        BetStatus::Won => Some(GREEN),
        BetStatus::Lost => Some(RED),
        BetStatus::Pending => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
