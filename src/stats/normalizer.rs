use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::models::{DirectionTable, ScoreEntry, ScoreMethod};

/// Running mean and variance over a cohort (Welford).
#[derive(Debug, Clone, Copy, Default)]
pub struct CohortStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl CohortStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (N - 1 denominator). `None` below two entries.
    pub fn sample_std_dev(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        Some((self.m2 / (self.count - 1) as f64).sqrt())
    }
}

impl FromIterator<f64> for CohortStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = CohortStats::default();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

/// Standardizes one cohort of raw scores and orients the result so a larger
/// value is always the better performance. Zero-variance and single-entry
/// cohorts map to exactly `0.0`.
///
/// The statistics are accumulated over the sorted scores, so the same
/// multiset of raw scores yields bit-identical unit scores in any order.
pub fn unit_scores(raw_scores: &[i32], method: ScoreMethod) -> Vec<f64> {
    let mut sorted = raw_scores.to_vec();
    sorted.sort_unstable();
    let stats: CohortStats = sorted.into_iter().map(f64::from).collect();

    match stats.sample_std_dev() {
        Some(std_dev) if std_dev > 0.0 => raw_scores
            .iter()
            .map(|&score| (f64::from(score) - stats.mean()) / std_dev * method.multiplier())
            .collect(),
        _ => vec![0.0; raw_scores.len()],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitScore<'a> {
    pub player_name: &'a str,
    pub value: f64,
}

/// All unit scores for one (date, game) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort<'a> {
    pub date: NaiveDate,
    pub game_name: &'a str,
    pub units: Vec<UnitScore<'a>>,
}

/// Groups entries by (date, game) and normalizes each group. Cohorts come
/// back ordered by date, then game name.
pub fn normalize_cohorts<'a>(
    entries: &'a [ScoreEntry],
    directions: &DirectionTable,
) -> Vec<Cohort<'a>> {
    let mut groups: BTreeMap<(NaiveDate, &'a str), Vec<&'a ScoreEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry((entry.date, entry.game_name.as_str()))
            .or_default()
            .push(entry);
    }

    groups
        .into_iter()
        .map(|((date, game_name), members)| {
            let raw: Vec<i32> = members.iter().map(|e| e.score).collect();
            let values = unit_scores(&raw, directions.method_or_default(game_name));
            let units = members
                .iter()
                .zip(values)
                .map(|(entry, value)| UnitScore {
                    player_name: entry.player_name.as_str(),
                    value,
                })
                .collect();
            Cohort {
                date,
                game_name,
                units,
            }
        })
        .collect()
}
