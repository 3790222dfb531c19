//! In-memory game and bet store.
//!
//! The store is the only mutable state in the process. Records live in
//! insertion-ordered vectors behind a `tokio::sync::RwLock`, which gives
//! per-record atomicity for every operation. There are no cross-record
//! transactions: deleting a game does not cascade to its bets — their
//! denormalized snapshots are the point.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::{Bet, BetSelection, BetStatus, Game, GameDetails, GameOdds, GameStatus, PoolError};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Payload for creating or updating a game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub name: String,
    pub home_team: String,
    pub away_team: String,
    pub odds: GameOdds,
    #[serde(default = "default_game_status")]
    pub status: GameStatus,
}

fn default_game_status() -> GameStatus {
    GameStatus::Active
}

/// Payload for placing a bet. The accepted odd, team-name snapshot, and
/// possible win are all derived from the referenced game at placement.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    pub player: String,
    pub game_id: String,
    #[serde(rename = "type")]
    pub selection: BetSelection,
    pub amount: Decimal,
}

/// Payload for settling a bet. Status is the only mutable field.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBetRequest {
    pub status: BetStatus,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct StoreInner {
    games: Vec<Game>,
    bets: Vec<Bet>,
}

/// Shared game/bet store.
#[derive(Default)]
pub struct PoolStore {
    inner: RwLock<StoreInner>,
}

impl PoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Games ------------------------------------------------------------

    /// All games in insertion order.
    pub async fn list_games(&self) -> Vec<Game> {
        self.inner.read().await.games.clone()
    }

    pub async fn get_game(&self, id: &str) -> Result<Game, PoolError> {
        self.inner
            .read()
            .await
            .games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| PoolError::GameNotFound(id.to_string()))
    }

    pub async fn create_game(&self, req: GameRequest) -> Result<Game, PoolError> {
        validate_game_request(&req)?;
        let game = Game {
            id: Uuid::new_v4().to_string(),
            name: req.name,
            home_team: req.home_team,
            away_team: req.away_team,
            odds: req.odds,
            status: req.status,
            created_at: Utc::now(),
        };
        info!(game_id = %game.id, name = %game.name, "Game created");
        self.inner.write().await.games.push(game.clone());
        Ok(game)
    }

    /// Replace a game's mutable fields. Existing bets keep their
    /// creation-time snapshots regardless.
    pub async fn update_game(&self, id: &str, req: GameRequest) -> Result<Game, PoolError> {
        validate_game_request(&req)?;
        let mut inner = self.inner.write().await;
        let game = inner
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| PoolError::GameNotFound(id.to_string()))?;
        game.name = req.name;
        game.home_team = req.home_team;
        game.away_team = req.away_team;
        game.odds = req.odds;
        game.status = req.status;
        debug!(game_id = id, "Game updated");
        Ok(game.clone())
    }

    pub async fn delete_game(&self, id: &str) -> Result<(), PoolError> {
        let mut inner = self.inner.write().await;
        let before = inner.games.len();
        inner.games.retain(|g| g.id != id);
        if inner.games.len() == before {
            return Err(PoolError::GameNotFound(id.to_string()));
        }
        info!(game_id = id, "Game deleted");
        Ok(())
    }

    // -- Bets -------------------------------------------------------------

    /// All bets in insertion order.
    pub async fn list_bets(&self) -> Vec<Bet> {
        self.inner.read().await.bets.clone()
    }

    pub async fn get_bet(&self, id: &str) -> Result<Bet, PoolError> {
        self.inner
            .read()
            .await
            .bets
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| PoolError::BetNotFound(id.to_string()))
    }

    /// Place a bet: resolves the game, snapshots its name, team names and
    /// the quoted odd, and fixes `possible_win = amount * odd` (2 dp).
    /// None of these are ever recomputed.
    pub async fn place_bet(&self, req: PlaceBetRequest) -> Result<Bet, PoolError> {
        if req.player.is_empty() {
            return Err(PoolError::InvalidRequest("player must not be empty".into()));
        }
        if req.amount <= Decimal::ZERO {
            return Err(PoolError::InvalidRequest("amount must be positive".into()));
        }

        let mut inner = self.inner.write().await;
        let game = inner
            .games
            .iter()
            .find(|g| g.id == req.game_id)
            .ok_or_else(|| PoolError::GameNotFound(req.game_id.clone()))?;
        if !game.is_active() {
            return Err(PoolError::GameClosed(game.id.clone()));
        }

        let odd = game.odd_for(req.selection);
        let bet = Bet {
            id: Uuid::new_v4().to_string(),
            player: req.player,
            game_id: game.id.clone(),
            game_name: game.name.clone(),
            selection: req.selection,
            amount: req.amount,
            odd,
            possible_win: (req.amount * odd).round_dp(2),
            status: BetStatus::Pending,
            created_at: Utc::now(),
            game_details: GameDetails {
                home_team: Some(game.home_team.clone()),
                away_team: Some(game.away_team.clone()),
            },
        };
        info!(
            bet_id = %bet.id,
            player = %bet.player,
            game = %bet.game_name,
            amount = %bet.amount,
            odd = %bet.odd,
            "Bet placed"
        );
        inner.bets.push(bet.clone());
        Ok(bet)
    }

    /// Settle a bet. Only the status changes; amount, odd, and possible
    /// win stay frozen.
    pub async fn update_bet(&self, id: &str, req: UpdateBetRequest) -> Result<Bet, PoolError> {
        let mut inner = self.inner.write().await;
        let bet = inner
            .bets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| PoolError::BetNotFound(id.to_string()))?;
        bet.status = req.status;
        debug!(bet_id = id, status = %bet.status, "Bet settled");
        Ok(bet.clone())
    }

    pub async fn delete_bet(&self, id: &str) -> Result<(), PoolError> {
        let mut inner = self.inner.write().await;
        let before = inner.bets.len();
        inner.bets.retain(|b| b.id != id);
        if inner.bets.len() == before {
            return Err(PoolError::BetNotFound(id.to_string()));
        }
        info!(bet_id = id, "Bet deleted");
        Ok(())
    }

    // -- Reporting --------------------------------------------------------

    /// Owned copies of the full dataset for one report request. Each
    /// report builds from its own snapshot, so concurrent requests need
    /// no coordination.
    pub async fn snapshot(&self) -> (Vec<Game>, Vec<Bet>) {
        let inner = self.inner.read().await;
        (inner.games.clone(), inner.bets.clone())
    }
}

fn validate_game_request(req: &GameRequest) -> Result<(), PoolError> {
    if req.name.is_empty() || req.home_team.is_empty() || req.away_team.is_empty() {
        return Err(PoolError::InvalidRequest(
            "game name and team names must not be empty".into(),
        ));
    }
    if req.odds.home <= Decimal::ZERO
        || req.odds.draw <= Decimal::ZERO
        || req.odds.away <= Decimal::ZERO
    {
        return Err(PoolError::InvalidRequest("odds must be positive".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
