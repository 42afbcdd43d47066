use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::models::{GameModel, PlayerModel};
use crate::shared::AppError;
use crate::stats::ScoreMethod;

/// Trait for player and game catalog lookups
#[async_trait]
pub trait CatalogRepository {
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError>;
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError>;
    async fn find_player(&self, name: &str) -> Result<Option<PlayerModel>, AppError>;
    async fn find_game(&self, name: &str) -> Result<Option<GameModel>, AppError>;
    /// Games linked to a player, in catalog order
    async fn games_for_player(&self, player_id: i32) -> Result<Vec<GameModel>, AppError>;
}

#[derive(Debug, Default)]
struct CatalogData {
    players: Vec<PlayerModel>,
    games: Vec<GameModel>,
    links: Vec<(i32, i32)>, // (player_id, game_id)
}

/// In-memory implementation of CatalogRepository for development and testing
///
/// Ids are assigned sequentially from 1 in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    data: Mutex<CatalogData>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, CatalogData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a player, or returns the existing one with that name
    pub fn add_player(&self, name: &str) -> PlayerModel {
        let mut data = self.data();
        if let Some(existing) = data.players.iter().find(|p| p.name == name) {
            return existing.clone();
        }
        let player = PlayerModel {
            id: data.players.len() as i32 + 1,
            name: name.to_string(),
        };
        data.players.push(player.clone());
        player
    }

    /// Adds a game, or returns the existing one with that name
    pub fn add_game(&self, name: &str, score_method: ScoreMethod) -> GameModel {
        let mut data = self.data();
        if let Some(existing) = data.games.iter().find(|g| g.name == name) {
            return existing.clone();
        }
        let game = GameModel {
            id: data.games.len() as i32 + 1,
            name: name.to_string(),
            score_method,
        };
        data.games.push(game.clone());
        game
    }

    pub fn link(&self, player_id: i32, game_id: i32) {
        let mut data = self.data();
        if !data.links.contains(&(player_id, game_id)) {
            data.links.push((player_id, game_id));
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        Ok(self.data().players.clone())
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        Ok(self.data().games.clone())
    }

    #[instrument(skip(self))]
    async fn find_player(&self, name: &str) -> Result<Option<PlayerModel>, AppError> {
        let player = self.data().players.iter().find(|p| p.name == name).cloned();
        if player.is_none() {
            debug!(player_name = %name, "Player not found in memory");
        }
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn find_game(&self, name: &str) -> Result<Option<GameModel>, AppError> {
        let game = self.data().games.iter().find(|g| g.name == name).cloned();
        if game.is_none() {
            debug!(game_name = %name, "Game not found in memory");
        }
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn games_for_player(&self, player_id: i32) -> Result<Vec<GameModel>, AppError> {
        let data = self.data();
        Ok(data
            .games
            .iter()
            .filter(|game| data.links.contains(&(player_id, game.id)))
            .cloned()
            .collect())
    }
}

/// PostgreSQL implementation of catalog repository
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn game_from_row(row: &PgRow) -> Result<GameModel, AppError> {
    let code: i32 = row.try_get("score_method")?;
    let score_method = ScoreMethod::try_from(code).map_err(|e| {
        warn!(error = %e, "Unexpected score method stored for game");
        AppError::DatabaseError(e)
    })?;

    Ok(GameModel {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        score_method,
    })
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let players = sqlx::query_as::<_, PlayerModel>("SELECT id, name FROM players ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        debug!(player_count = players.len(), "Players loaded from database");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        let rows = sqlx::query("SELECT id, name, score_method FROM games ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(game_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_player(&self, name: &str) -> Result<Option<PlayerModel>, AppError> {
        let player =
            sqlx::query_as::<_, PlayerModel>("SELECT id, name FROM players WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn find_game(&self, name: &str) -> Result<Option<GameModel>, AppError> {
        let row = sqlx::query("SELECT id, name, score_method FROM games WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(game_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn games_for_player(&self, player_id: i32) -> Result<Vec<GameModel>, AppError> {
        let rows = sqlx::query(
            "SELECT g.id, g.name, g.score_method FROM games g \
             JOIN player_games pg ON pg.game_id = g.id \
             WHERE pg.player_id = $1 ORDER BY g.id",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(game_from_row).collect()
    }
}
