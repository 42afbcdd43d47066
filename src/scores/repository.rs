use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::{models::ScoreModel, types::ScoreQuery};
use crate::catalog::models::{GameModel, PlayerModel};
use crate::shared::AppError;
use crate::stats::ScoreEntry;

/// Trait for raw score storage
///
/// Implementations enforce at most one score per (player, game, date).
#[async_trait]
pub trait ScoreRepository {
    async fn find_score(
        &self,
        player_id: i32,
        game_id: i32,
        date: NaiveDate,
    ) -> Result<Option<ScoreModel>, AppError>;

    /// Returns `AppError::Conflict` when the (player, game, date) key is taken
    async fn insert_score(
        &self,
        player: &PlayerModel,
        game: &GameModel,
        date: NaiveDate,
        score: i32,
    ) -> Result<ScoreModel, AppError>;

    /// Replaces the score value of an existing record; the key never changes
    async fn update_score(&self, score_id: i32, score: i32) -> Result<ScoreModel, AppError>;

    async fn list_scores(&self, query: &ScoreQuery) -> Result<Vec<ScoreEntry>, AppError>;
}

#[derive(Debug, Clone)]
struct StoredScore {
    model: ScoreModel,
    player_name: String,
    game_name: String,
}

impl StoredScore {
    fn to_entry(&self) -> ScoreEntry {
        ScoreEntry::new(
            self.model.date,
            self.player_name.clone(),
            self.game_name.clone(),
            self.model.score,
        )
    }
}

/// In-memory implementation of ScoreRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryScoreRepository {
    scores: Mutex<Vec<StoredScore>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn scores(&self) -> MutexGuard<'_, Vec<StoredScore>> {
        self.scores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current number of stored scores
    pub fn score_count(&self) -> usize {
        self.scores().len()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    #[instrument(skip(self))]
    async fn find_score(
        &self,
        player_id: i32,
        game_id: i32,
        date: NaiveDate,
    ) -> Result<Option<ScoreModel>, AppError> {
        let found = self
            .scores()
            .iter()
            .find(|s| {
                s.model.player_id == player_id && s.model.game_id == game_id && s.model.date == date
            })
            .map(|s| s.model.clone());
        Ok(found)
    }

    #[instrument(skip(self, player, game), fields(player_name = %player.name, game_name = %game.name))]
    async fn insert_score(
        &self,
        player: &PlayerModel,
        game: &GameModel,
        date: NaiveDate,
        score: i32,
    ) -> Result<ScoreModel, AppError> {
        let mut scores = self.scores();
        let taken = scores.iter().any(|s| {
            s.model.player_id == player.id && s.model.game_id == game.id && s.model.date == date
        });
        if taken {
            warn!(%date, "Score already exists in memory");
            return Err(AppError::Conflict(format!(
                "Score already exists for {} in {} for {}",
                player.name, game.name, date
            )));
        }

        let model = ScoreModel {
            id: scores.len() as i32 + 1,
            date,
            player_id: player.id,
            game_id: game.id,
            score,
        };
        scores.push(StoredScore {
            model: model.clone(),
            player_name: player.name.clone(),
            game_name: game.name.clone(),
        });

        debug!(score_id = model.id, "Score stored in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn update_score(&self, score_id: i32, score: i32) -> Result<ScoreModel, AppError> {
        let mut scores = self.scores();
        let stored = scores
            .iter_mut()
            .find(|s| s.model.id == score_id)
            .ok_or(AppError::InvalidUpdate)?;
        stored.model.score = score;
        Ok(stored.model.clone())
    }

    #[instrument(skip(self))]
    async fn list_scores(&self, query: &ScoreQuery) -> Result<Vec<ScoreEntry>, AppError> {
        let scores = self.scores();
        let mut matching: Vec<&StoredScore> = scores
            .iter()
            .filter(|s| query.matches(s.model.date, &s.player_name, &s.game_name))
            .collect();
        matching.sort_by_key(|s| (s.model.date, s.model.game_id, s.model.player_id));

        debug!(score_count = matching.len(), "Scores listed from memory");
        Ok(matching.into_iter().map(StoredScore::to_entry).collect())
    }
}

/// PostgreSQL implementation of score repository
pub struct PostgresScoreRepository {
    pool: PgPool,
}

impl PostgresScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PostgresScoreRepository {
    #[instrument(skip(self))]
    async fn find_score(
        &self,
        player_id: i32,
        game_id: i32,
        date: NaiveDate,
    ) -> Result<Option<ScoreModel>, AppError> {
        let score = sqlx::query_as::<_, ScoreModel>(
            "SELECT id, date, player_id, game_id, score FROM scores \
             WHERE player_id = $1 AND game_id = $2 AND date = $3",
        )
        .bind(player_id)
        .bind(game_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(score)
    }

    #[instrument(skip(self, player, game), fields(player_name = %player.name, game_name = %game.name))]
    async fn insert_score(
        &self,
        player: &PlayerModel,
        game: &GameModel,
        date: NaiveDate,
        score: i32,
    ) -> Result<ScoreModel, AppError> {
        let inserted = sqlx::query_as::<_, ScoreModel>(
            "INSERT INTO scores (date, player_id, game_id, score) VALUES ($1, $2, $3, $4) \
             RETURNING id, date, player_id, game_id, score",
        )
        .bind(date)
        .bind(player.id)
        .bind(game.id)
        .bind(score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    warn!(%date, "Score insert hit unique constraint");
                    return AppError::Conflict(format!(
                        "Score already exists for {} in {} for {}",
                        player.name, game.name, date
                    ));
                }
            }
            AppError::from(e)
        })?;

        debug!(score_id = inserted.id, "Score stored in database");
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn update_score(&self, score_id: i32, score: i32) -> Result<ScoreModel, AppError> {
        let updated = sqlx::query_as::<_, ScoreModel>(
            "UPDATE scores SET score = $2 WHERE id = $1 \
             RETURNING id, date, player_id, game_id, score",
        )
        .bind(score_id)
        .bind(score)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| {
            warn!(score_id, "Score not found for update");
            AppError::InvalidUpdate
        })
    }

    #[instrument(skip(self))]
    async fn list_scores(&self, query: &ScoreQuery) -> Result<Vec<ScoreEntry>, AppError> {
        let rows = sqlx::query(
            "SELECT s.date, p.name AS player_name, g.name AS game_name, s.score \
             FROM scores s \
             JOIN players p ON p.id = s.player_id \
             JOIN games g ON g.id = s.game_id \
             WHERE s.date >= $1 \
               AND ($2::date IS NULL OR s.date <= $2) \
               AND ($3::text IS NULL OR p.name = $3) \
               AND ($4::text IS NULL OR g.name = $4) \
             ORDER BY s.date, g.id, p.id",
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(query.player_name.as_deref())
        .bind(query.game_name.as_deref())
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .iter()
            .map(|row| {
                Ok(ScoreEntry {
                    date: row.try_get("date")?,
                    player_name: row.try_get("player_name")?,
                    game_name: row.try_get("game_name")?,
                    score: row.try_get("score")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        debug!(score_count = entries.len(), "Scores listed from database");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ScoreMethod;
    use chrono::Datelike;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn player(id: i32, name: &str) -> PlayerModel {
        PlayerModel {
            id,
            name: name.to_string(),
        }
    }

    fn game(id: i32, name: &str) -> GameModel {
        GameModel {
            id,
            name: name.to_string(),
            score_method: ScoreMethod::Low,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = InMemoryScoreRepository::new();
        let stored = repo
            .insert_score(&player(1, "phil"), &game(1, "Sudoku"), date(1), 180)
            .await
            .unwrap();

        let found = repo.find_score(1, 1, date(1)).await.unwrap();
        assert_eq!(found, Some(stored));
        assert!(repo.find_score(1, 1, date(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_key_is_a_conflict() {
        let repo = InMemoryScoreRepository::new();
        let phil = player(1, "phil");
        let sudoku = game(1, "Sudoku");
        repo.insert_score(&phil, &sudoku, date(1), 180).await.unwrap();

        let result = repo.insert_score(&phil, &sudoku, date(1), 150).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.score_count(), 1);
    }

    #[tokio::test]
    async fn update_replaces_only_the_score() {
        let repo = InMemoryScoreRepository::new();
        let stored = repo
            .insert_score(&player(1, "phil"), &game(1, "Sudoku"), date(1), 180)
            .await
            .unwrap();

        let updated = repo.update_score(stored.id, 150).await.unwrap();
        assert_eq!(updated.score, 150);
        assert_eq!(updated.date, stored.date);
        assert_eq!(updated.player_id, stored.player_id);

        let missing = repo.update_score(42, 1).await;
        assert!(matches!(missing, Err(AppError::InvalidUpdate)));
    }

    #[tokio::test]
    async fn list_scores_applies_filters_in_stable_order() {
        let repo = InMemoryScoreRepository::new();
        let phil = player(1, "phil");
        let spencer = player(2, "spencer");
        let sudoku = game(1, "Sudoku");
        let crossword = game(2, "Crossword");

        repo.insert_score(&spencer, &crossword, date(1), 200).await.unwrap();
        repo.insert_score(&phil, &sudoku, date(2), 165).await.unwrap();
        repo.insert_score(&phil, &crossword, date(1), 240).await.unwrap();
        repo.insert_score(&spencer, &sudoku, date(1), 100).await.unwrap();

        let all = repo.list_scores(&ScoreQuery::from_date(date(1))).await.unwrap();
        let order: Vec<(u32, &str, &str)> = all
            .iter()
            .map(|s| (s.date.day(), s.game_name.as_str(), s.player_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "Sudoku", "spencer"),
                (1, "Crossword", "phil"),
                (1, "Crossword", "spencer"),
                (2, "Sudoku", "phil"),
            ]
        );

        let day_one = repo.list_scores(&ScoreQuery::for_day(date(1))).await.unwrap();
        assert_eq!(day_one.len(), 3);

        let phil_only = repo
            .list_scores(&ScoreQuery::from_date(date(1)).with_player("phil"))
            .await
            .unwrap();
        assert_eq!(phil_only.len(), 2);

        let crossword_only = repo
            .list_scores(&ScoreQuery::from_date(date(1)).with_game("Crossword"))
            .await
            .unwrap();
        assert_eq!(crossword_only.len(), 2);
    }
}
