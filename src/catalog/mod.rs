// Public API - what other modules can use
pub use handlers::{games_for_player, list_players};
pub use service::{direction_table, CatalogService};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
