use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::models::{GameModel, PlayerModel};
use crate::stats::{PlayerMonthlyPoint, ScoreEntry};

/// Response for the daily scoreboard: raw scores plus the combined ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScoreboardResponse {
    pub date: NaiveDate,
    pub players: Vec<PlayerModel>,
    pub games: Vec<GameModel>, // Includes the synthetic "Combined" game last
    pub scores: Vec<ScoreEntry>,
}

/// Response for the monthly points table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyScoreboardResponse {
    pub players: Vec<PlayerModel>,
    pub categories: Vec<String>,
    pub games: Vec<String>,
    pub player_points: Vec<PlayerMonthlyPoint>,
}
