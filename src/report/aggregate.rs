//! Bet aggregation — the pure core of report generation.
//!
//! Turns a flat list of bet records into global summary statistics, a
//! per-player breakdown, and display-ready bet rows. No I/O, no side
//! effects; everything downstream (model assembly, both renderers) is
//! layout over the output of this module.
//!
//! Money is accumulated as `Decimal` throughout so the global and
//! per-player totals reconcile to the cent.

use rust_decimal::Decimal;

use crate::types::{Bet, BetSelection, BetStatus, Game};

// ---------------------------------------------------------------------------
// Global summary
// ---------------------------------------------------------------------------

/// Global statistics over every bet in the dataset.
///
/// The three status counts always partition `total_bets`: unknown wire
/// statuses were already normalized to pending at deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_bets: usize,
    pub total_amount: Decimal,
    pub pending_count: usize,
    pub won_count: usize,
    pub lost_count: usize,
    /// Won share of all bets, one decimal place ("33.3%"); "0%" when
    /// there are no bets.
    pub win_rate: String,
}

/// Compute the global summary over all bets.
pub fn summarize(bets: &[Bet]) -> Summary {
    let mut total_amount = Decimal::ZERO;
    let mut pending = 0usize;
    let mut won = 0usize;
    let mut lost = 0usize;

    for bet in bets {
        total_amount += bet.amount;
        match bet.status {
            BetStatus::Pending => pending += 1,
            BetStatus::Won => won += 1,
            BetStatus::Lost => lost += 1,
        }
    }

    Summary {
        total_bets: bets.len(),
        total_amount,
        pending_count: pending,
        won_count: won,
        lost_count: lost,
        win_rate: win_rate(won, bets.len()),
    }
}

/// Percentage of bets won, rendered for display.
fn win_rate(won: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", won as f64 * 100.0 / total as f64)
}

// ---------------------------------------------------------------------------
// Per-bet shaping
// ---------------------------------------------------------------------------

/// Resolve the display label for a bet's selection.
///
/// Home/away resolve to the team name snapshotted on the bet, then to the
/// live game's team name, then to a literal fallback. Draw (which also
/// absorbs unknown selections) is always the literal "Draw".
pub fn selection_label(bet: &Bet, games: &[Game]) -> String {
    let live_game = || games.iter().find(|g| g.id == bet.game_id);
    match bet.selection {
        BetSelection::Home => bet
            .game_details
            .home_team
            .clone()
            .or_else(|| live_game().map(|g| g.home_team.clone()))
            .unwrap_or_else(|| "Home".to_string()),
        BetSelection::Away => bet
            .game_details
            .away_team
            .clone()
            .or_else(|| live_game().map(|g| g.away_team.clone()))
            .unwrap_or_else(|| "Away".to_string()),
        BetSelection::Draw => "Draw".to_string(),
    }
}

/// The realized outcome of a bet, if it has one.
///
/// Won bets pay out the stored possible win (never recomputed from
/// `amount * odd`), lost bets pay zero, and pending bets have no numeric
/// outcome — renderers must show a placeholder, not zero.
pub fn outcome_amount(bet: &Bet) -> Option<Decimal> {
    match bet.status {
        BetStatus::Won => Some(bet.possible_win),
        BetStatus::Lost => Some(Decimal::ZERO),
        BetStatus::Pending => None,
    }
}

/// One display-ready bet row. Amounts stay `Decimal` here; currency
/// strings are produced once, in the report model.
#[derive(Debug, Clone)]
pub struct BetRow {
    pub player: String,
    pub game_name: String,
    pub selection: String,
    pub amount: Decimal,
    pub odd: Decimal,
    pub status: BetStatus,
    pub outcome: Option<Decimal>,
}

/// Shape a single bet into its display row.
pub fn shape_row(bet: &Bet, games: &[Game]) -> BetRow {
    BetRow {
        player: bet.player.clone(),
        game_name: bet.game_name.clone(),
        selection: selection_label(bet, games),
        amount: bet.amount,
        odd: bet.odd,
        status: bet.status,
        outcome: outcome_amount(bet),
    }
}

// ---------------------------------------------------------------------------
// Per-player grouping
// ---------------------------------------------------------------------------

/// One player's slice of the pool.
#[derive(Debug, Clone)]
pub struct PlayerAggregate {
    pub player: String,
    /// Sum of stakes across the player's bets.
    pub total_staked: Decimal,
    /// Maximum exposure: sum of possible wins over all the player's bets
    /// regardless of status. Not a realized-winnings figure.
    pub total_possible_win: Decimal,
    pub won_count: usize,
    pub lost_count: usize,
    pub pending_count: usize,
    /// The player's bets in input order, pre-shaped for display.
    pub rows: Vec<BetRow>,
}

impl PlayerAggregate {
    fn new(player: String) -> Self {
        Self {
            player,
            total_staked: Decimal::ZERO,
            total_possible_win: Decimal::ZERO,
            won_count: 0,
            lost_count: 0,
            pending_count: 0,
            rows: Vec::new(),
        }
    }
}

/// Group bets by player, preserving first-seen player order.
///
/// Grouping is by exact string equality: names differing in case or
/// whitespace are distinct players. That mirrors how bets are recorded
/// (free-text names) and keeps report output deterministic for a
/// deterministic input order.
pub fn group_by_player(bets: &[Bet], games: &[Game]) -> Vec<PlayerAggregate> {
    let mut players: Vec<PlayerAggregate> = Vec::new();

    for bet in bets {
        let idx = match players.iter().position(|p| p.player == bet.player) {
            Some(i) => i,
            None => {
                players.push(PlayerAggregate::new(bet.player.clone()));
                players.len() - 1
            }
        };
        let agg = &mut players[idx];
        agg.total_staked += bet.amount;
        agg.total_possible_win += bet.possible_win;
        match bet.status {
            BetStatus::Pending => agg.pending_count += 1,
            BetStatus::Won => agg.won_count += 1,
            BetStatus::Lost => agg.lost_count += 1,
        }
        agg.rows.push(shape_row(bet, games));
    }

    players
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
