use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request payload for submitting or correcting a score
///
/// The score is unsigned so negative values are rejected at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCreate {
    pub date: NaiveDate,
    pub player_name: String,
    pub game_name: String,
    pub score: u32,
}

/// Query parameters for listing raw scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuery {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub player_name: Option<String>,
    pub game_name: Option<String>,
}

impl ScoreQuery {
    /// Every score from `start_date` onward
    pub fn from_date(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            player_name: None,
            game_name: None,
        }
    }

    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            end_date: Some(end_date),
            ..Self::from_date(start_date)
        }
    }

    pub fn for_day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    pub fn with_player(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = Some(player_name.into());
        self
    }

    pub fn with_game(mut self, game_name: impl Into<String>) -> Self {
        self.game_name = Some(game_name.into());
        self
    }

    pub fn matches(&self, date: NaiveDate, player_name: &str, game_name: &str) -> bool {
        date >= self.start_date
            && self.end_date.map_or(true, |end| date <= end)
            && self.player_name.as_deref().map_or(true, |p| p == player_name)
            && self.game_name.as_deref().map_or(true, |g| g == game_name)
    }
}

/// Query parameter for the single-day and monthly views
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}
