use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::models::{DirectionTable, ScoreEntry, COMBINED_GAME_NAME};
use super::normalizer::{normalize_cohorts, Cohort};

/// Unit scores for a single day, indexed by player then game.
#[derive(Debug, Default)]
pub(crate) struct DayScores<'a> {
    games: BTreeSet<&'a str>,
    players: BTreeMap<&'a str, BTreeMap<&'a str, f64>>,
}

impl<'a> DayScores<'a> {
    fn add_cohort(&mut self, cohort: &Cohort<'a>) {
        self.games.insert(cohort.game_name);
        for unit in &cohort.units {
            self.players
                .entry(unit.player_name)
                .or_default()
                .insert(cohort.game_name, unit.value);
        }
    }

    /// A player counts toward combined scoring only when they have a score in
    /// every game anyone played that day.
    pub(crate) fn is_eligible(&self, player_name: &str) -> bool {
        self.players
            .get(player_name)
            .is_some_and(|games| games.len() == self.games.len())
    }

    /// Summed unit scores for eligible players only.
    ///
    /// Each player's values are added in ascending order so equal multisets
    /// of unit scores always give bit-identical totals.
    pub(crate) fn combined_totals(&self) -> BTreeMap<&'a str, f64> {
        self.players
            .iter()
            .filter(|(player, _)| self.is_eligible(player))
            .map(|(player, games)| (*player, canonical_sum(games.values().copied())))
            .collect()
    }
}

fn canonical_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Splits normalized cohorts back into per-day tables.
pub(crate) fn group_by_day<'a>(cohorts: &[Cohort<'a>]) -> BTreeMap<NaiveDate, DayScores<'a>> {
    let mut days: BTreeMap<NaiveDate, DayScores<'a>> = BTreeMap::new();
    for cohort in cohorts {
        days.entry(cohort.date).or_default().add_cohort(cohort);
    }
    days
}

/// Builds the synthetic "Combined" records for the given day's scores.
///
/// Combined scores are rounded half away from zero. Players missing any of
/// the day's games get no record. If `entries` spans several days each day
/// is ranked independently.
pub fn daily_combined_scores(entries: &[ScoreEntry], directions: &DirectionTable) -> Vec<ScoreEntry> {
    let cohorts = normalize_cohorts(entries, directions);

    group_by_day(&cohorts)
        .into_iter()
        .flat_map(|(date, day)| {
            day.combined_totals()
                .into_iter()
                .map(move |(player, total)| {
                    ScoreEntry::new(date, player, COMBINED_GAME_NAME, total.round() as i32)
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ScoreMethod;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn directions() -> DirectionTable {
        DirectionTable::new()
            .with_game("Sudoku", ScoreMethod::Low)
            .with_game("Crossword", ScoreMethod::Low)
    }

    #[test]
    fn empty_day_produces_no_combined_scores() {
        assert!(daily_combined_scores(&[], &directions()).is_empty());
    }

    #[test]
    fn single_game_day_ranks_everyone_who_played_it() {
        let entries = vec![
            ScoreEntry::new(day(), "phil", "Sudoku", 180),
            ScoreEntry::new(day(), "spencer", "Sudoku", 100),
        ];

        let combined = daily_combined_scores(&entries, &directions());
        assert_eq!(
            combined,
            vec![
                ScoreEntry::new(day(), "phil", COMBINED_GAME_NAME, -1),
                ScoreEntry::new(day(), "spencer", COMBINED_GAME_NAME, 1),
            ]
        );
    }

    #[test]
    fn players_missing_a_game_are_excluded() {
        let entries = vec![
            ScoreEntry::new(day(), "phil", "Sudoku", 180),
            ScoreEntry::new(day(), "phil", "Crossword", 240),
            ScoreEntry::new(day(), "spencer", "Sudoku", 100),
            ScoreEntry::new(day(), "spencer", "Crossword", 200),
            ScoreEntry::new(day(), "alex", "Sudoku", 150),
        ];

        let combined = daily_combined_scores(&entries, &directions());
        let players: Vec<&str> = combined.iter().map(|s| s.player_name.as_str()).collect();
        assert_eq!(players, vec!["phil", "spencer"]);
        assert!(combined.iter().all(|s| s.game_name == COMBINED_GAME_NAME));
        assert!(combined.iter().all(|s| s.date == day()));
    }

    #[test]
    fn combined_is_sum_of_unit_scores() {
        // Both cohorts are two-player, so each unit score is +/- 1/sqrt(2).
        let entries = vec![
            ScoreEntry::new(day(), "phil", "Sudoku", 180),
            ScoreEntry::new(day(), "phil", "Crossword", 240),
            ScoreEntry::new(day(), "spencer", "Sudoku", 100),
            ScoreEntry::new(day(), "spencer", "Crossword", 200),
        ];

        let combined = daily_combined_scores(&entries, &directions());
        let phil = combined.iter().find(|s| s.player_name == "phil").unwrap();
        let spencer = combined.iter().find(|s| s.player_name == "spencer").unwrap();
        assert_eq!(phil.score, -1);
        assert_eq!(spencer.score, 1);
    }

    #[test]
    fn day_scores_eligibility_uses_games_played_that_day() {
        let entries = vec![
            ScoreEntry::new(day(), "phil", "Sudoku", 180),
            ScoreEntry::new(day(), "spencer", "Sudoku", 100),
            ScoreEntry::new(day(), "spencer", "Crossword", 200),
        ];
        let cohorts = normalize_cohorts(&entries, &directions());
        let days = group_by_day(&cohorts);
        let scores = days.get(&day()).unwrap();

        assert!(!scores.is_eligible("phil"));
        assert!(scores.is_eligible("spencer"));
        assert!(!scores.is_eligible("nobody"));
        assert_eq!(scores.combined_totals().len(), 1);
    }

    #[test]
    fn equal_unit_score_multisets_sum_identically() {
        let high = DirectionTable::new()
            .with_game("Sudoku", ScoreMethod::High)
            .with_game("Crossword", ScoreMethod::High)
            .with_game("Wordle", ScoreMethod::High);
        // Same raw triple per game, rotated between players, so every
        // player ends up with the same three unit scores.
        let rotations = [("ana", [0, 1, 3]), ("ben", [1, 3, 0]), ("cy", [3, 0, 1])];
        let mut entries = Vec::new();
        for (player, scores) in rotations {
            for (game, score) in ["Sudoku", "Crossword", "Wordle"].into_iter().zip(scores) {
                entries.push(ScoreEntry::new(day(), player, game, score));
            }
        }

        let cohorts = normalize_cohorts(&entries, &high);
        let days = group_by_day(&cohorts);
        let totals = days.get(&day()).unwrap().combined_totals();
        let values: Vec<u64> = totals.values().map(|v| v.to_bits()).collect();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|bits| *bits == values[0]));
    }

    #[test]
    fn recomputation_is_identical() {
        let entries = vec![
            ScoreEntry::new(day(), "phil", "Sudoku", 172),
            ScoreEntry::new(day(), "spencer", "Sudoku", 101),
            ScoreEntry::new(day(), "alex", "Sudoku", 133),
        ];
        let first = daily_combined_scores(&entries, &directions());
        let second = daily_combined_scores(&entries, &directions());
        assert_eq!(first, second);
    }
}
