use chrono::NaiveDate;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::types::{DailyScoreboardResponse, MonthlyScoreboardResponse};
use crate::catalog::{
    direction_table,
    models::{GameModel, PlayerModel},
    repository::CatalogRepository,
};
use crate::scores::{repository::ScoreRepository, ScoreQuery};
use crate::shared::AppError;
use crate::stats::{
    daily_combined_scores, monthly_points, MonthWindow, PointCategory, ScoreEntry, StatsError,
};

/// Shapes one day's raw scores and their combined ranking into the daily view.
pub fn assemble_daily(
    date: NaiveDate,
    players: Vec<PlayerModel>,
    games: Vec<GameModel>,
    day_scores: Vec<ScoreEntry>,
) -> DailyScoreboardResponse {
    let combined = daily_combined_scores(&day_scores, &direction_table(&games));

    let mut games = games;
    games.push(GameModel::combined());

    let mut scores = day_scores;
    scores.extend(combined);

    DailyScoreboardResponse {
        date,
        players,
        games,
        scores,
    }
}

/// Shapes a month of raw scores into the points table. Fails with
/// `NoDataForPeriod` when nothing was recorded inside `window`.
pub fn assemble_monthly(
    window: &MonthWindow,
    players: Vec<PlayerModel>,
    games: &[GameModel],
    month_scores: &[ScoreEntry],
) -> Result<MonthlyScoreboardResponse, StatsError> {
    let player_points = monthly_points(window, month_scores, &direction_table(games))?;

    Ok(MonthlyScoreboardResponse {
        players,
        categories: PointCategory::iter().map(|c| c.to_string()).collect(),
        games: games.iter().map(|g| g.name.clone()).collect(),
        player_points,
    })
}

/// Service loading score snapshots and handing them to the scoring engine
pub struct ScoreboardService {
    catalog_repository: Arc<dyn CatalogRepository + Send + Sync>,
    score_repository: Arc<dyn ScoreRepository + Send + Sync>,
}

impl ScoreboardService {
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepository + Send + Sync>,
        score_repository: Arc<dyn ScoreRepository + Send + Sync>,
    ) -> Self {
        Self {
            catalog_repository,
            score_repository,
        }
    }

    /// Combined ranking for a single day, empty when nobody played
    #[instrument(skip(self))]
    pub async fn combined_scores(&self, date: NaiveDate) -> Result<Vec<ScoreEntry>, AppError> {
        let day_scores = self
            .score_repository
            .list_scores(&ScoreQuery::for_day(date))
            .await?;
        if day_scores.is_empty() {
            debug!("No scores recorded for day");
            return Ok(Vec::new());
        }

        let games = self.catalog_repository.list_games().await?;
        Ok(daily_combined_scores(&day_scores, &direction_table(&games)))
    }

    #[instrument(skip(self))]
    pub async fn daily(&self, date: NaiveDate) -> Result<DailyScoreboardResponse, AppError> {
        let players = self.catalog_repository.list_players().await?;
        let games = self.catalog_repository.list_games().await?;
        let day_scores = self
            .score_repository
            .list_scores(&ScoreQuery::for_day(date))
            .await?;

        let response = assemble_daily(date, players, games, day_scores);
        info!(score_count = response.scores.len(), "Daily scoreboard assembled");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn monthly(&self, date: NaiveDate) -> Result<MonthlyScoreboardResponse, AppError> {
        let window = MonthWindow::ending(date);
        let players = self.catalog_repository.list_players().await?;
        let games = self.catalog_repository.list_games().await?;
        let month_scores = self
            .score_repository
            .list_scores(&ScoreQuery::between(window.start, window.end))
            .await?;

        let response = assemble_monthly(&window, players, &games, &month_scores)?;
        info!(
            start = %window.start,
            end = %window.end,
            point_count = response.player_points.len(),
            "Monthly scoreboard assembled"
        );
        Ok(response)
    }
}
