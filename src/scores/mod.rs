// Public API - what other modules can use
pub use handlers::{add_score, list_scores, update_score};
pub use service::ScoreService;
pub use types::{DateQuery, ScoreCreate, ScoreQuery};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
mod types;
