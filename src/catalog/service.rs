use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    models::{GameModel, PlayerModel},
    repository::CatalogRepository,
};
use crate::shared::AppError;
use crate::stats::DirectionTable;

/// Service for player and game lookups
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository + Send + Sync>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    pub async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        self.repository.list_players().await
    }

    pub async fn list_games(&self) -> Result<Vec<GameModel>, AppError> {
        self.repository.list_games().await
    }

    /// Games a player is signed up for
    #[instrument(skip(self))]
    pub async fn games_for_player(&self, player_name: &str) -> Result<Vec<GameModel>, AppError> {
        let player = self.require_player(player_name).await?;
        let games = self.repository.games_for_player(player.id).await?;
        debug!(player_name, game_count = games.len(), "Loaded games for player");
        Ok(games)
    }

    pub async fn require_player(&self, player_name: &str) -> Result<PlayerModel, AppError> {
        self.repository
            .find_player(player_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))
    }

    pub async fn require_game(&self, game_name: &str) -> Result<GameModel, AppError> {
        self.repository
            .find_game(game_name)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}

/// Directionality table in catalog order
pub fn direction_table(games: &[GameModel]) -> DirectionTable {
    games
        .iter()
        .map(|game| (game.name.clone(), game.score_method))
        .collect()
}
