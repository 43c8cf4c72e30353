use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

use crate::domain::errors::ApiError;
use crate::domain::ports::Clock;
use crate::interface_adapters::protocol::{
    request_headers, EnrollRequest, ErrorResponse, OpponentResponse, RandomOpponentQuery,
    SaveRoundRequest, SaveRoundResponse, TokenResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::admission::AdmissionGate;
use crate::use_cases::enroll::EnrollPlayerUseCase;
use crate::use_cases::headers::validate_headers;
use crate::use_cases::random_opponent::RandomOpponentUseCase;
use crate::use_cases::save_round::SaveRoundUseCase;
use crate::use_cases::tokens::TokenSigner;

// Liveness probe.
pub async fn liveness() -> &'static str {
    "Hello World!"
}

// Handler for enrolling a new player and issuing their first session token.
#[tracing::instrument(name = "enroll", skip_all)]
pub async fn enroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EnrollRequest>,
) -> Result<Json<TokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Enrollment needs valid client headers but no prior token.
    let bundle = request_headers(&headers);
    validate_headers(&bundle, SystemClock.now_epoch_seconds()).map_err(reject)?;

    let use_case = EnrollPlayerUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        signer: TokenSigner::new(state.auth.token_secret.clone()),
    };

    let result = use_case.execute(payload).await.map_err(map_api_error)?;
    tracing::info!(player_id = %result.player_id, "player enrolled.");

    Ok(Json(TokenResponse {
        token: result.token,
    }))
}

// Handler for persisting one round of the admitted player's state.
#[tracing::instrument(name = "save_round", skip_all)]
pub async fn save_round(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveRoundRequest>,
) -> Result<Json<SaveRoundResponse>, (StatusCode, Json<ErrorResponse>)> {
    let player_id = admit(&state, &headers)?;

    let use_case = SaveRoundUseCase {
        store: state.store.clone(),
    };
    use_case
        .execute(&player_id, payload)
        .await
        .map_err(map_api_error)?;

    Ok(Json(SaveRoundResponse {
        message: "round saved".to_string(),
    }))
}

// Handler for fetching a random opposing player's state for a round.
#[tracing::instrument(name = "random_opponent", skip_all)]
pub async fn random_opponent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RandomOpponentQuery>,
) -> Result<Json<Option<OpponentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let player_id = admit(&state, &headers)?;
    let round = query.round.ok_or(ApiError::MissingFields).map_err(reject)?;

    let use_case = RandomOpponentUseCase {
        store: state.store.clone(),
    };
    let opponent = use_case
        .execute(&player_id, round)
        .await
        .map_err(map_api_error)?;

    Ok(Json(opponent.map(|opponent| OpponentResponse {
        name: opponent.name,
        health: opponent.health,
        inventory: opponent.inventory,
        round: opponent.round,
    })))
}

// Run the admission gate over the raw request headers.
fn admit(state: &AppState, headers: &HeaderMap) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let bundle = request_headers(headers);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let gate = AdmissionGate {
        clock: SystemClock,
        signer: TokenSigner::new(state.auth.token_secret.clone()),
        hmac_secret: state.auth.hmac_secret.clone(),
    };

    gate.admit(&bundle, authorization).map_err(reject)
}

// Log a rejected request at debug level before translating it.
fn reject(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::debug!(error = ?err, "request rejected.");
    map_api_error(err)
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, error: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

// Maps domain errors onto the HTTP contract. Storage and internal details
// are logged here and replaced with a generic message for the caller.
fn map_api_error(err: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        ApiError::MissingHeader(name) => {
            error_response(StatusCode::FORBIDDEN, &format!("missing header: {name}"))
        }
        ApiError::InvalidClientType => error_response(StatusCode::FORBIDDEN, "Invalid client type"),
        ApiError::InvalidGameClient => error_response(StatusCode::FORBIDDEN, "Invalid game client"),
        ApiError::RequestExpired => error_response(StatusCode::FORBIDDEN, "Request expired"),
        ApiError::MissingToken => error_response(StatusCode::UNAUTHORIZED, "No token provided"),
        ApiError::InvalidToken | ApiError::TokenExpired => {
            error_response(StatusCode::UNAUTHORIZED, "Invalid or expired token")
        }
        ApiError::InvalidSignature => error_response(StatusCode::FORBIDDEN, "Invalid signature"),
        ApiError::MissingFields => {
            error_response(StatusCode::BAD_REQUEST, "missing required fields")
        }
        ApiError::InvalidName => error_response(StatusCode::BAD_REQUEST, "invalid name"),
        ApiError::StorageFailure(detail) => {
            tracing::error!(error = %detail, "store operation failed.");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
        ApiError::Internal(detail) => {
            tracing::error!(error = %detail, "internal failure.");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}
