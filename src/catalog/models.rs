use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::stats::{ScoreMethod, COMBINED_GAME_NAME};

/// Database model for players table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: i32,
    pub name: String, // Unique display name, also the key scores are reported under
}

/// Database model for games table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModel {
    pub id: i32,
    pub name: String,
    pub score_method: ScoreMethod,
}

impl GameModel {
    /// Pseudo-game listed next to the real ones on the daily scoreboard.
    pub fn combined() -> Self {
        Self {
            id: 0,
            name: COMBINED_GAME_NAME.to_string(),
            score_method: ScoreMethod::High,
        }
    }
}
