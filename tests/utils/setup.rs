use axum::Router;
use std::sync::Arc;

use puzzle_scoreboard::{
    catalog::repository::InMemoryCatalogRepository, router,
    scores::repository::InMemoryScoreRepository, AppState, ScoreMethod,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub catalog: Arc<InMemoryCatalogRepository>,
    pub scores: Arc<InMemoryScoreRepository>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    games: Vec<(String, ScoreMethod)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            games: vec![],
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_game(mut self, name: &str, score_method: ScoreMethod) -> Self {
        self.games.push((name.to_string(), score_method));
        self
    }

    /// phil and spencer, both playing low-wins sudoku and crossword
    pub fn with_default_league(self) -> Self {
        self.with_players(vec!["phil", "spencer"])
            .with_game("Sudoku", ScoreMethod::Low)
            .with_game("Crossword", ScoreMethod::Low)
    }

    /// Every player is linked to every game
    pub fn build(self) -> TestSetup {
        let catalog = Arc::new(InMemoryCatalogRepository::new());
        let players: Vec<_> = self
            .players
            .iter()
            .map(|name| catalog.add_player(name))
            .collect();
        let games: Vec<_> = self
            .games
            .iter()
            .map(|(name, method)| catalog.add_game(name, *method))
            .collect();
        for player in &players {
            for game in &games {
                catalog.link(player.id, game.id);
            }
        }

        let scores = Arc::new(InMemoryScoreRepository::new());
        let state = AppState::new(catalog.clone(), scores.clone());

        TestSetup {
            app: router(state),
            catalog,
            scores,
        }
    }
}
