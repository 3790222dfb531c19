//! Report model assembly.
//!
//! `build_report_model` is the single entry point both renderers consume.
//! It validates the dataset, runs the aggregation engine, and produces
//! fully formatted display strings — currency formatting happens here and
//! nowhere else, so the two output formats can never disagree numerically
//! for the same input.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::config::ReportConfig;
use crate::report::aggregate::{self, BetRow, Summary};
use crate::types::{Bet, BetStatus, Game, PoolError};

/// Placeholder shown for a pending bet's outcome. Never a zero amount —
/// that would read as a lost bet.
pub const PENDING_OUTCOME: &str = "-";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Renderer-agnostic report data. Renderers only walk this structure and
/// emit layout primitives; they perform no aggregation or formatting.
#[derive(Debug, Clone)]
pub struct ReportModel {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Typed summary, kept for consumers that want the raw figures.
    pub summary: Summary,
    /// Summary as label/value pairs, in display order.
    pub summary_rows: Vec<(String, String)>,
    /// Every bet as one display row, in input order (flat view).
    pub rows: Vec<DisplayRow>,
    /// Per-player sections in first-seen order (grouped view).
    pub players: Vec<PlayerSection>,
}

/// One fully formatted bet row.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub player: String,
    pub game: String,
    pub selection: String,
    pub amount: String,
    pub odd: String,
    pub status: String,
    /// Formatted payout for settled bets, [`PENDING_OUTCOME`] otherwise.
    pub outcome: String,
    /// Raw status, kept so renderers can highlight won/lost rows.
    pub status_kind: BetStatus,
}

/// One player's section of the grouped view.
#[derive(Debug, Clone)]
pub struct PlayerSection {
    pub player: String,
    pub total_staked: String,
    pub total_possible_win: String,
    pub won_count: usize,
    pub lost_count: usize,
    pub pending_count: usize,
    pub rows: Vec<DisplayRow>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the report model for a dataset snapshot.
///
/// Fails fast on any malformed record: a partial financial report is
/// worse than no report, so nothing is silently omitted.
pub fn build_report_model(
    games: &[Game],
    bets: &[Bet],
    cfg: &ReportConfig,
) -> Result<ReportModel, PoolError> {
    for game in games {
        validate_game(game)?;
    }
    for bet in bets {
        validate_bet(bet)?;
    }

    let summary = aggregate::summarize(bets);
    let sym = cfg.currency_symbol.as_str();

    let summary_rows = vec![
        ("Total Bets".to_string(), summary.total_bets.to_string()),
        (
            "Total Amount Staked".to_string(),
            money(sym, summary.total_amount),
        ),
        ("Pending Bets".to_string(), summary.pending_count.to_string()),
        ("Won Bets".to_string(), summary.won_count.to_string()),
        ("Lost Bets".to_string(), summary.lost_count.to_string()),
        ("Win Rate".to_string(), summary.win_rate.clone()),
    ];

    let rows = bets
        .iter()
        .map(|bet| display_row(&aggregate::shape_row(bet, games), sym))
        .collect();

    let players = aggregate::group_by_player(bets, games)
        .into_iter()
        .map(|agg| PlayerSection {
            player: agg.player,
            total_staked: money(sym, agg.total_staked),
            total_possible_win: money(sym, agg.total_possible_win),
            won_count: agg.won_count,
            lost_count: agg.lost_count,
            pending_count: agg.pending_count,
            rows: agg.rows.iter().map(|r| display_row(r, sym)).collect(),
        })
        .collect();

    Ok(ReportModel {
        title: cfg.title.clone(),
        generated_at: Utc::now(),
        summary,
        summary_rows,
        rows,
        players,
    })
}

fn display_row(row: &BetRow, sym: &str) -> DisplayRow {
    DisplayRow {
        player: row.player.clone(),
        game: row.game_name.clone(),
        selection: row.selection.clone(),
        amount: money(sym, row.amount),
        odd: format_amount(row.odd),
        status: row.status.label().to_string(),
        outcome: match row.outcome {
            Some(amount) => money(sym, amount),
            None => PENDING_OUTCOME.to_string(),
        },
        status_kind: row.status,
    }
}

/// Fixed two-decimal rendering with a period separator and no thousands
/// grouping. The one currency convention used across both report formats.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn money(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{}", format_amount(amount))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_game(game: &Game) -> Result<(), PoolError> {
    let fail = |reason: &str| {
        Err(PoolError::MalformedGame {
            id: game.id.clone(),
            reason: reason.to_string(),
        })
    };
    if game.id.is_empty() {
        return fail("missing id");
    }
    if game.name.is_empty() {
        return fail("missing name");
    }
    if game.home_team.is_empty() || game.away_team.is_empty() {
        return fail("missing team name");
    }
    if game.odds.home <= Decimal::ZERO
        || game.odds.draw <= Decimal::ZERO
        || game.odds.away <= Decimal::ZERO
    {
        return fail("odds must be positive");
    }
    Ok(())
}

fn validate_bet(bet: &Bet) -> Result<(), PoolError> {
    let fail = |reason: &str| {
        Err(PoolError::MalformedBet {
            id: bet.id.clone(),
            reason: reason.to_string(),
        })
    };
    if bet.id.is_empty() {
        return fail("missing id");
    }
    if bet.player.is_empty() {
        return fail("missing player name");
    }
    if bet.amount <= Decimal::ZERO {
        return fail("amount must be positive");
    }
    if bet.odd <= Decimal::ZERO {
        return fail("odd must be positive");
    }
    if bet.possible_win < Decimal::ZERO {
        return fail("possible win must not be negative");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
