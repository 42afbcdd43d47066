use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{GameModel, PlayerModel},
    service::CatalogService,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all players
///
/// GET /players/
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerModel>>, AppError> {
    let service = CatalogService::new(Arc::clone(&state.catalog_repository));
    let players = service.list_players().await?;

    info!(player_count = players.len(), "Players listed successfully");

    Ok(Json(players))
}

/// HTTP handler for the games a player plays
///
/// GET /games/:player_name
#[instrument(name = "games_for_player", skip(state))]
pub async fn games_for_player(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<Vec<GameModel>>, AppError> {
    let service = CatalogService::new(Arc::clone(&state.catalog_repository));
    let games = service.games_for_player(&player_name).await?;

    Ok(Json(games))
}
