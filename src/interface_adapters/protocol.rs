use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::RequestHeaders;

// Request payload for player enrollment.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub name: Option<String>,
    // Sent by the client as a string or a number.
    #[serde(rename = "characterId")]
    pub character_id: Option<Value>,
}

// Response payload carrying a freshly issued session token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// Request payload for saving one round of player state.
#[derive(Debug, Deserialize)]
pub struct SaveRoundRequest {
    pub health: Option<i32>,
    pub inventory: Option<Value>,
    pub round: Option<i32>,
}

// Response payload confirming a round save.
#[derive(Debug, Serialize)]
pub struct SaveRoundResponse {
    pub message: String,
}

// Query parameters for the random opponent lookup.
#[derive(Debug, Deserialize)]
pub struct RandomOpponentQuery {
    pub round: Option<i32>,
}

// Response payload describing the opposing player's round state.
#[derive(Debug, Serialize)]
pub struct OpponentResponse {
    pub name: String,
    pub health: i32,
    pub inventory: Value,
    pub round: i32,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Pull the client headers out of the raw header map for validation. Empty
// values count as absent.
pub fn request_headers(headers: &HeaderMap) -> RequestHeaders {
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    RequestHeaders {
        client_type: value("x-client-type"),
        game_client: value("x-game-client"),
        timestamp: value("x-timestamp"),
        platform: value("x-platform"),
        signature: value("x-signature"),
    }
}
