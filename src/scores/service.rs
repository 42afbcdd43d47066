use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{repository::ScoreRepository, types::ScoreCreate, types::ScoreQuery};
use crate::catalog::{repository::CatalogRepository, CatalogService};
use crate::shared::AppError;
use crate::stats::ScoreEntry;

/// Service for recording and querying raw scores
pub struct ScoreService {
    catalog: CatalogService,
    repository: Arc<dyn ScoreRepository + Send + Sync>,
}

impl ScoreService {
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepository + Send + Sync>,
        repository: Arc<dyn ScoreRepository + Send + Sync>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(catalog_repository),
            repository,
        }
    }

    /// Records a new score. Each player may submit one score per game per day.
    #[instrument(skip(self, request), fields(player_name = %request.player_name, game_name = %request.game_name, date = %request.date))]
    pub async fn add_score(&self, request: ScoreCreate) -> Result<ScoreEntry, AppError> {
        let score = checked_score(request.score)?;
        let player = self.catalog.require_player(&request.player_name).await?;
        let game = self.catalog.require_game(&request.game_name).await?;

        if let Some(existing) = self
            .repository
            .find_score(player.id, game.id, request.date)
            .await?
        {
            warn!(existing_score = existing.score, "Duplicate score submission");
            return Err(AppError::Conflict(format!(
                "Score already exists for {} in {} for {} (recorded score: {})",
                player.name, game.name, request.date, existing.score
            )));
        }

        let stored = self
            .repository
            .insert_score(&player, &game, request.date, score)
            .await?;

        info!(score_id = stored.id, score, "Score recorded");
        Ok(ScoreEntry::new(stored.date, player.name, game.name, stored.score))
    }

    /// Corrects the score of an existing (player, game, date) record
    #[instrument(skip(self, request), fields(player_name = %request.player_name, game_name = %request.game_name, date = %request.date))]
    pub async fn update_score(&self, request: ScoreCreate) -> Result<ScoreEntry, AppError> {
        let score = checked_score(request.score)?;
        let player = self.catalog.require_player(&request.player_name).await?;
        let game = self.catalog.require_game(&request.game_name).await?;

        let existing = self
            .repository
            .find_score(player.id, game.id, request.date)
            .await?
            .ok_or_else(|| {
                warn!("No score to update");
                AppError::InvalidUpdate
            })?;

        let updated = self.repository.update_score(existing.id, score).await?;

        info!(
            score_id = updated.id,
            previous = existing.score,
            score = updated.score,
            "Score updated"
        );
        Ok(ScoreEntry::new(updated.date, player.name, game.name, updated.score))
    }

    #[instrument(skip(self))]
    pub async fn list_scores(&self, query: &ScoreQuery) -> Result<Vec<ScoreEntry>, AppError> {
        let scores = self.repository.list_scores(query).await?;
        debug!(score_count = scores.len(), "Scores listed");
        Ok(scores)
    }
}

fn checked_score(raw: u32) -> Result<i32, AppError> {
    i32::try_from(raw).map_err(|_| AppError::BadRequest("Score is out of range".to_string()))
}
