// Public API - what other modules can use
pub use handlers::{combined_scores, daily_scoreboard, monthly_scoreboard};
pub use service::{assemble_daily, assemble_monthly, ScoreboardService};
pub use types::{DailyScoreboardResponse, MonthlyScoreboardResponse};

// Internal modules
mod handlers;
mod service;
mod types;
