use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for scores table
///
/// Unique on (player_id, game_id, date).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ScoreModel {
    pub id: i32,
    pub date: NaiveDate,
    pub player_id: i32,
    pub game_id: i32,
    pub score: i32,
}
