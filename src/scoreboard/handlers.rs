use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::ScoreboardService,
    types::{DailyScoreboardResponse, MonthlyScoreboardResponse},
};
use crate::scores::DateQuery;
use crate::shared::{reject_future_date, AppError, AppState};
use crate::stats::ScoreEntry;

fn scoreboard_service(state: &AppState) -> ScoreboardService {
    ScoreboardService::new(
        Arc::clone(&state.catalog_repository),
        Arc::clone(&state.score_repository),
    )
}

/// HTTP handler for one day's combined ranking
///
/// GET /scores/combined?date=YYYY-MM-DD
#[instrument(name = "combined_scores", skip(state))]
pub async fn combined_scores(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<ScoreEntry>>, AppError> {
    let date = reject_future_date(query.date)?;
    let scores = scoreboard_service(&state).combined_scores(date).await?;

    info!(%date, player_count = scores.len(), "Combined scores computed");

    Ok(Json(scores))
}

/// HTTP handler for the daily scoreboard
///
/// GET /scores/daily?date=YYYY-MM-DD
#[instrument(name = "daily_scoreboard", skip(state))]
pub async fn daily_scoreboard(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyScoreboardResponse>, AppError> {
    let date = reject_future_date(query.date)?;
    let scoreboard = scoreboard_service(&state).daily(date).await?;

    Ok(Json(scoreboard))
}

/// HTTP handler for the monthly points table, from the 1st through `date`
///
/// GET /scores/monthly?date=YYYY-MM-DD
#[instrument(name = "monthly_scoreboard", skip(state))]
pub async fn monthly_scoreboard(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<MonthlyScoreboardResponse>, AppError> {
    let date = reject_future_date(query.date)?;
    let scoreboard = scoreboard_service(&state).monthly(date).await?;

    Ok(Json(scoreboard))
}
