use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crush_match::matcher::normalize;
use crush_types::api::ConnectResponse;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    pub wallet_address: String,
    pub nickname: Option<String>,
}

/// POST /api/connect — register a wallet, or touch it if it already exists.
pub async fn connect(
    State(state): State<AppState>,
    Query(params): Query<ConnectParams>,
) -> Result<Json<ConnectResponse>, ApiError> {
    if params.wallet_address.len() < 10 {
        return Err(ApiError::BadRequest("Invalid wallet address".into()));
    }

    let db = state.clone();
    let address = params.wallet_address.clone();
    let nickname = params.nickname.clone();
    tokio::task::spawn_blocking(move || db.db.upsert_user(&address, nickname.as_deref()))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(|e| ApiError::storage("Failed to connect wallet. Please try again!", e))?;

    Ok(Json(ConnectResponse {
        success: true,
        message: "Wallet connected successfully!".to_string(),
        wallet_address: normalize(&params.wallet_address),
    }))
}
