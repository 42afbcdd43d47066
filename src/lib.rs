// Library crate for the puzzle scoreboard server
// This file exposes the public API for main.rs and integration tests

pub mod app;
pub mod catalog;
pub mod config;
pub mod scoreboard;
pub mod scores;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use app::router;
pub use config::AppConfig;
pub use shared::{AppError, AppState};
pub use stats::{PointCategory, ScoreEntry, ScoreMethod};
