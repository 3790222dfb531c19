//! Shared types for the betting pool.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that store, report, and server
//! modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// A game players can bet on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    /// Display name, e.g. "Arsenal vs Chelsea".
    pub name: String,
    pub home_team: String,
    pub away_team: String,
    pub odds: GameOdds,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (1: {} | X: {} | 2: {})",
            self.id, self.name, self.odds.home, self.odds.draw, self.odds.away,
        )
    }
}

impl Game {
    /// Whether new bets may still be placed on this game.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// The odd quoted for a given selection.
    pub fn odd_for(&self, selection: BetSelection) -> Decimal {
        match selection {
            BetSelection::Home => self.odds.home,
            BetSelection::Draw => self.odds.draw,
            BetSelection::Away => self.odds.away,
        }
    }

    /// Helper to build a test/sample game with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        use rust_decimal_macros::dec;
        Game {
            id: "game-001".to_string(),
            name: "Arsenal vs Chelsea".to_string(),
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            odds: GameOdds {
                home: dec!(2.10),
                draw: dec!(3.25),
                away: dec!(3.40),
            },
            status: GameStatus::Active,
            created_at: Utc::now(),
        }
    }
}

/// Decimal odds quoted for each selection of a game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameOdds {
    pub home: Decimal,
    pub draw: Decimal,
    pub away: Decimal,
}

/// Game lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    #[serde(other)]
    Closed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Closed => write!(f, "closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet
// ---------------------------------------------------------------------------

/// A single placed bet.
///
/// `game_name`, `game_details`, `odd`, and `possible_win` are snapshots
/// taken at bet creation. Editing or deleting the referenced game later
/// must not alter them; `status` is the only field that mutates after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    /// Player identity is the exact string, case-sensitive, untrimmed.
    pub player: String,
    /// Reference to the game at placement time; not guaranteed to still
    /// resolve once the game is deleted.
    pub game_id: String,
    pub game_name: String,
    #[serde(rename = "type")]
    pub selection: BetSelection,
    pub amount: Decimal,
    /// Odd accepted at placement. Never recomputed from the live game.
    pub odd: Decimal,
    /// Payout if the selection is correct. Fixed at placement; the
    /// aggregation engine treats it as opaque input.
    pub possible_win: Decimal,
    pub status: BetStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub game_details: GameDetails,
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} on {} ({} @ {} -> {})",
            self.player, self.amount, self.game_name, self.selection, self.odd, self.status,
        )
    }
}

impl Bet {
    /// Helper to build a test/sample bet with sensible defaults.
    #[cfg(test)]
    pub fn sample(player: &str, status: BetStatus) -> Self {
        use rust_decimal_macros::dec;
        Bet {
            id: format!("bet-{player}"),
            player: player.to_string(),
            game_id: "game-001".to_string(),
            game_name: "Arsenal vs Chelsea".to_string(),
            selection: BetSelection::Home,
            amount: dec!(10.00),
            odd: dec!(2.00),
            possible_win: dec!(20.00),
            status,
            created_at: Utc::now(),
            game_details: GameDetails {
                home_team: Some("Arsenal".to_string()),
                away_team: Some("Chelsea".to_string()),
            },
        }
    }
}

/// Denormalized team names copied from the game at bet creation.
/// Optional because hand-fed report payloads may omit them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The side of a game a bet is placed on.
///
/// Unrecognized wire values collapse to `Draw`, which keeps their display
/// label conservative without rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSelection {
    Home,
    Away,
    #[serde(other)]
    Draw,
}

impl fmt::Display for BetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetSelection::Home => write!(f, "home"),
            BetSelection::Draw => write!(f, "draw"),
            BetSelection::Away => write!(f, "away"),
        }
    }
}

/// Bet settlement status.
///
/// Unrecognized wire values collapse to `Pending` so that display and
/// counting stay conservative (a bet is never silently shown as settled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Won,
    Lost,
    #[serde(other)]
    Pending,
}

impl BetStatus {
    /// Human-readable label used by both report formats.
    pub fn label(&self) -> &'static str {
        match self {
            BetStatus::Pending => "Pending",
            BetStatus::Won => "Won",
            BetStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetStatus::Pending => write!(f, "pending"),
            BetStatus::Won => write!(f, "won"),
            BetStatus::Lost => write!(f, "lost"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the betting pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Malformed bet {id}: {reason}")]
    MalformedBet { id: String, reason: String },

    #[error("Malformed game {id}: {reason}")]
    MalformedGame { id: String, reason: String },

    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("Bet not found: {0}")]
    BetNotFound(String),

    #[error("Game {0} is not open for betting")]
    GameClosed(String),

    #[error("Invalid bet request: {0}")]
    InvalidRequest(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
