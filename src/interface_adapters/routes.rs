use crate::interface_adapters::handlers::{enroll, liveness, random_opponent, save_round};
use crate::interface_adapters::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn app(state: AppState) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/", get(liveness))
        .route("/auth/new", post(enroll))
        .route("/player/save", post(save_round))
        .route("/player/random", get(random_opponent))
        .with_state(state)
}
