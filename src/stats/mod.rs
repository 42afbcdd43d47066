//! Scoring engine: turns raw per-game scores into comparable unit scores,
//! daily combined rankings and monthly point totals.
//!
//! Everything in here is a pure function of the score slice it is handed.
//! Nothing is cached between calls and no I/O happens below this module.

pub mod daily;
pub mod monthly;
pub mod normalizer;

mod errors;
pub mod models;

pub use daily::daily_combined_scores;
pub use errors::StatsError;
pub use models::*;
pub use monthly::monthly_points;
pub use normalizer::{normalize_cohorts, unit_scores, Cohort, CohortStats, UnitScore};
