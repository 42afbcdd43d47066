use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::catalog::repository::CatalogRepository;
use crate::scores::repository::ScoreRepository;
use crate::stats::StatsError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub catalog_repository: Arc<dyn CatalogRepository + Send + Sync>,
    pub score_repository: Arc<dyn ScoreRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepository + Send + Sync>,
        score_repository: Arc<dyn ScoreRepository + Send + Sync>,
    ) -> Self {
        Self {
            catalog_repository,
            score_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Score does not exist and cannot be updated")]
    InvalidUpdate,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::NoDataForPeriod { .. } => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        warn!(error = %err, "Database operation failed");
        AppError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidUpdate => (
                StatusCode::BAD_REQUEST,
                "Score does not exist and cannot be updated".to_string(),
            ),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Scores can only be entered or queried up to today's date on the server.
pub fn reject_future_date(date: NaiveDate) -> Result<NaiveDate, AppError> {
    let today = Local::now().date_naive();
    if date > today {
        warn!(%date, %today, "Rejecting request for a future date");
        return Err(AppError::BadRequest("Invalid date in the request".to_string()));
    }
    Ok(date)
}
