use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// Game name used for the synthetic per-day combined ranking.
pub const COMBINED_GAME_NAME: &str = "Combined";

/// Whether a game rewards high or low raw scores.
///
/// On the wire this is the integer `100` (high wins) or `-100` (low wins);
/// only the sign matters to the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ScoreMethod {
    High,
    Low,
}

impl ScoreMethod {
    pub const HIGH_CODE: i32 = 100;
    pub const LOW_CODE: i32 = -100;

    /// Sign applied to a standardized score so that larger always means better.
    pub fn multiplier(self) -> f64 {
        match self {
            ScoreMethod::High => 1.0,
            ScoreMethod::Low => -1.0,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ScoreMethod::High => Self::HIGH_CODE,
            ScoreMethod::Low => Self::LOW_CODE,
        }
    }
}

impl From<ScoreMethod> for i32 {
    fn from(method: ScoreMethod) -> Self {
        method.code()
    }
}

impl TryFrom<i32> for ScoreMethod {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            ScoreMethod::HIGH_CODE => Ok(ScoreMethod::High),
            ScoreMethod::LOW_CODE => Ok(ScoreMethod::Low),
            other => Err(format!("Invalid score method: {}", other)),
        }
    }
}

/// One observed result. Also used for the synthetic "Combined" records,
/// whose score can be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub player_name: String,
    pub game_name: String,
    pub score: i32,
}

impl ScoreEntry {
    pub fn new(
        date: NaiveDate,
        player_name: impl Into<String>,
        game_name: impl Into<String>,
        score: i32,
    ) -> Self {
        Self {
            date,
            player_name: player_name.into(),
            game_name: game_name.into(),
            score,
        }
    }
}

/// Directionality per game, kept in catalog order so that per-game point
/// categories come out in a stable order.
#[derive(Debug, Clone, Default)]
pub struct DirectionTable {
    games: Vec<(String, ScoreMethod)>,
}

impl DirectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, name: impl Into<String>, method: ScoreMethod) -> Self {
        self.insert(name.into(), method);
        self
    }

    pub fn insert(&mut self, name: String, method: ScoreMethod) {
        match self.games.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = method,
            None => self.games.push((name, method)),
        }
    }

    pub fn method_for(&self, game_name: &str) -> Option<ScoreMethod> {
        self.games
            .iter()
            .find(|(name, _)| name == game_name)
            .map(|(_, method)| *method)
    }

    /// Lookup used by the aggregators. A game missing from the table is a
    /// caller bug: it is logged and treated as high-wins. That fallback is
    /// arbitrary and callers must not rely on it.
    pub(crate) fn method_or_default(&self, game_name: &str) -> ScoreMethod {
        self.method_for(game_name).unwrap_or_else(|| {
            warn!(game_name, "Game missing from direction table, assuming high wins");
            ScoreMethod::High
        })
    }

    pub fn game_names(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl FromIterator<(String, ScoreMethod)> for DirectionTable {
    fn from_iter<I: IntoIterator<Item = (String, ScoreMethod)>>(iter: I) -> Self {
        let mut table = DirectionTable::new();
        for (name, method) in iter {
            table.insert(name, method);
        }
        table
    }
}

/// Fixed point categories reported for every player each month. Each game
/// additionally gets a category named after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum PointCategory {
    Participation,
    Individual,
    Combined,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMonthlyPoint {
    pub player_name: String,
    pub category: String,
    pub points: i64,
}

/// Inclusive date range running from the first of a month to a cutoff day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn ending(end: NaiveDate) -> Self {
        // Day 1 exists in every month.
        let start = end.with_day(1).unwrap_or(end);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn score_method_serializes_as_signed_code() {
        assert_eq!(serde_json::to_string(&ScoreMethod::High).unwrap(), "100");
        assert_eq!(serde_json::to_string(&ScoreMethod::Low).unwrap(), "-100");

        let parsed: ScoreMethod = serde_json::from_str("-100").unwrap();
        assert_eq!(parsed, ScoreMethod::Low);
        assert!(serde_json::from_str::<ScoreMethod>("7").is_err());
    }

    #[test]
    fn score_entry_uses_camel_case() {
        let entry = ScoreEntry::new(
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "phil",
            "Sudoku",
            180,
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["playerName"], "phil");
        assert_eq!(json["gameName"], "Sudoku");
        assert_eq!(json["date"], "2025-12-01");
    }

    #[test]
    fn direction_table_keeps_insertion_order_and_overwrites() {
        let table = DirectionTable::new()
            .with_game("Sudoku", ScoreMethod::Low)
            .with_game("Crossword", ScoreMethod::Low)
            .with_game("Sudoku", ScoreMethod::High);

        assert_eq!(table.game_names().collect::<Vec<_>>(), vec!["Sudoku", "Crossword"]);
        assert_eq!(table.method_for("Sudoku"), Some(ScoreMethod::High));
        assert_eq!(table.method_for("Wordle"), None);
        assert_eq!(table.method_or_default("Wordle"), ScoreMethod::High);
    }

    #[test]
    fn point_categories_display_in_report_order() {
        let names: Vec<String> = PointCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["Participation", "Individual", "Combined", "Total"]);
    }

    #[test]
    fn month_window_starts_on_the_first() {
        let window = MonthWindow::ending(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    }
}
