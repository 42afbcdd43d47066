use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::{games_for_player, list_players};
use crate::scoreboard::{combined_scores, daily_scoreboard, monthly_scoreboard};
use crate::scores::{add_score, list_scores, update_score};
use crate::shared::AppState;

/// All HTTP routes. Layers (CORS, tracing) are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/players/", get(list_players))
        .route("/games/:player_name", get(games_for_player))
        .route("/score/", post(add_score).put(update_score))
        .route("/scores/", get(list_scores))
        .route("/scores/combined", get(combined_scores))
        .route("/scores/daily", get(daily_scoreboard))
        .route("/scores/monthly", get(monthly_scoreboard))
        .with_state(state)
}
