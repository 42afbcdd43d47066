use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::ScoreService,
    types::{ScoreCreate, ScoreQuery},
};
use crate::shared::{reject_future_date, AppError, AppState};
use crate::stats::ScoreEntry;

fn score_service(state: &AppState) -> ScoreService {
    ScoreService::new(
        Arc::clone(&state.catalog_repository),
        Arc::clone(&state.score_repository),
    )
}

/// HTTP handler for submitting a score
///
/// POST /score/
#[instrument(name = "add_score", skip(state))]
pub async fn add_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreCreate>,
) -> Result<Json<ScoreEntry>, AppError> {
    reject_future_date(request.date)?;

    let entry = score_service(&state).add_score(request).await?;
    info!(
        player_name = %entry.player_name,
        game_name = %entry.game_name,
        "Score submitted successfully"
    );

    Ok(Json(entry))
}

/// HTTP handler for correcting a previously submitted score
///
/// PUT /score/
#[instrument(name = "update_score", skip(state))]
pub async fn update_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreCreate>,
) -> Result<Json<ScoreEntry>, AppError> {
    reject_future_date(request.date)?;

    let entry = score_service(&state).update_score(request).await?;
    Ok(Json(entry))
}

/// HTTP handler for listing raw scores
///
/// GET /scores/?startDate=...&endDate=...&playerName=...&gameName=...
#[instrument(name = "list_scores", skip(state))]
pub async fn list_scores(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<Vec<ScoreEntry>>, AppError> {
    reject_future_date(query.start_date)?;
    if let Some(end_date) = query.end_date {
        reject_future_date(end_date)?;
    }

    let scores = score_service(&state).list_scores(&query).await?;
    info!(score_count = scores.len(), "Scores listed successfully");

    Ok(Json(scores))
}
