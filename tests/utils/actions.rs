use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request through the router and decode the JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    /// Submit a score and assert it was accepted
    pub async fn post_score(&self, date: &str, player: &str, game: &str, score: u32) {
        let (status, body) = self
            .send("POST", "/score/", Some(score_body(date, player, game, score)))
            .await;
        assert_eq!(status, StatusCode::OK, "score rejected: {}", body);
    }

    pub async fn put_score(
        &self,
        date: &str,
        player: &str,
        game: &str,
        score: u32,
    ) -> (StatusCode, Value) {
        self.send("PUT", "/score/", Some(score_body(date, player, game, score)))
            .await
    }
}

pub fn score_body(date: &str, player: &str, game: &str, score: u32) -> Value {
    json!({
        "date": date,
        "playerName": player,
        "gameName": game,
        "score": score,
    })
}

/// Points for one player and category out of a monthly scoreboard body
pub fn monthly_points(body: &Value, player: &str, category: &str) -> i64 {
    body["playerPoints"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["playerName"] == player && p["category"] == category)
        .and_then(|p| p["points"].as_i64())
        .unwrap_or_else(|| panic!("missing {} / {}", player, category))
}
