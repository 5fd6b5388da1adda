pub mod compat;
pub mod crushes;
pub mod error;
pub mod health;
pub mod matches;
pub mod state;
pub mod wallet;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Build the API router. Transport-level layers (CORS, request tracing) are
/// applied by the server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/api/connect", post(wallet::connect))
        .route("/api/crush/submit", post(crushes::submit))
        .route(
            "/api/crush/{wallet_address}/{crush_hash}",
            delete(crushes::remove),
        )
        .route("/api/matches/{wallet_address}", get(matches::list))
        .route("/api/stats/{wallet_address}", get(matches::stats))
        .route("/api/check-match", get(matches::check))
        .route("/api/compatibility", get(compat::check))
        .route("/api/health", get(health::health))
        .with_state(state)
}
