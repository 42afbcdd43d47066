use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::debug;

use super::daily::group_by_day;
use super::models::{DirectionTable, MonthWindow, PlayerMonthlyPoint, PointCategory, ScoreEntry};
use super::normalizer::normalize_cohorts;
use super::StatsError;

#[derive(Debug, Default)]
struct PlayerTally<'a> {
    participation: i64,
    combined: i64,
    per_game: BTreeMap<&'a str, i64>,
}

impl PlayerTally<'_> {
    fn individual(&self) -> i64 {
        self.per_game.values().sum()
    }

    fn total(&self) -> i64 {
        self.participation + self.individual() + self.combined
    }

    fn points_for(&self, category: PointCategory) -> i64 {
        match category {
            PointCategory::Participation => self.participation,
            PointCategory::Individual => self.individual(),
            PointCategory::Combined => self.combined,
            PointCategory::Total => self.total(),
        }
    }
}

/// Values this close to the maximum count as tied with it.
const TIE_TOLERANCE: f64 = 1e-9;

/// Returns the single holder of the highest value, or `None` when the
/// maximum is shared. Values within `TIE_TOLERANCE` of the maximum count as
/// holding it, since combined totals are sums of several float terms.
fn unique_winner<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Option<&'a str> {
    let values: Vec<(&'a str, f64)> = values.into_iter().collect();
    let max = values
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut leaders = values
        .iter()
        .filter(|(_, value)| max - value <= TIE_TOLERANCE);

    match (leaders.next(), leaders.next()) {
        (Some((player, _)), None) => Some(*player),
        _ => None,
    }
}

/// Accumulates participation, per-game, combined and total points for every
/// player with a score inside `window`.
///
/// Every player gets a record for every category, zero-valued included. Game
/// categories follow the order of `directions`.
pub fn monthly_points(
    window: &MonthWindow,
    entries: &[ScoreEntry],
    directions: &DirectionTable,
) -> Result<Vec<PlayerMonthlyPoint>, StatsError> {
    let in_window: Vec<ScoreEntry> = entries
        .iter()
        .filter(|entry| window.contains(entry.date))
        .cloned()
        .collect();

    if in_window.is_empty() {
        return Err(StatsError::NoDataForPeriod {
            start: window.start,
            end: window.end,
        });
    }

    let cohorts = normalize_cohorts(&in_window, directions);

    let mut tallies: BTreeMap<&str, PlayerTally> = in_window
        .iter()
        .map(|entry| (entry.player_name.as_str(), PlayerTally::default()))
        .collect();

    for cohort in &cohorts {
        let winner = unique_winner(cohort.units.iter().map(|u| (u.player_name, u.value)));
        if let Some(tally) = winner.and_then(|player| tallies.get_mut(player)) {
            *tally.per_game.entry(cohort.game_name).or_default() += 1;
        }
    }

    for (date, day) in group_by_day(&cohorts) {
        let combined = day.combined_totals();

        for player in combined.keys() {
            if let Some(tally) = tallies.get_mut(player) {
                tally.participation += 1;
            }
        }

        match unique_winner(combined.into_iter()) {
            Some(player) => {
                if let Some(tally) = tallies.get_mut(player) {
                    tally.combined += 1;
                }
            }
            None => debug!(%date, "No unique combined winner"),
        }
    }

    let points = tallies
        .iter()
        .flat_map(|(player, tally)| {
            let fixed = PointCategory::iter()
                .map(|category| (category.to_string(), tally.points_for(category)));
            let games = directions.game_names().map(|game| {
                (
                    game.to_string(),
                    tally.per_game.get(game).copied().unwrap_or_default(),
                )
            });

            fixed
                .chain(games)
                .map(|(category, points)| PlayerMonthlyPoint {
                    player_name: player.to_string(),
                    category,
                    points,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(points)
}
