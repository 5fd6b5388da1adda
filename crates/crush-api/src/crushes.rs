use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crush_match::matcher::normalize;
use crush_types::api::{CrushResponse, CrushSubmission, RemoveCrushResponse};

use crate::error::ApiError;
use crate::matches::mutual_crush_exists;
use crate::state::AppState;

/// POST /api/crush/submit — seal and store a crush, then see whether it
/// completed a mutual pair.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<CrushSubmission>,
) -> Result<Json<CrushResponse>, ApiError> {
    if req.crusher_address.trim().is_empty() || req.crush_address.trim().is_empty() {
        return Err(ApiError::BadRequest("Both addresses are required".into()));
    }
    if normalize(&req.crusher_address) == normalize(&req.crush_address) {
        return Err(ApiError::BadRequest(
            "You can't have a crush on yourself! (But self-love is important too)".into(),
        ));
    }

    let (sealed, crush_hash) = state
        .matcher
        .seal_address(&req.crush_address)
        .map_err(ApiError::Internal)?;
    let submission_id: String = crush_hash.chars().take(16).collect();

    let db = state.clone();
    let crusher = req.crusher_address.clone();
    let target = req.crush_address.clone();
    let matched = tokio::task::spawn_blocking(move || -> anyhow::Result<bool> {
        db.db.upsert_crush(&crusher, &sealed, &crush_hash)?;
        db.db.upsert_user(&crusher, None)?;

        // This submission may have completed a mutual pair; record it now.
        if mutual_crush_exists(&db.db, &db.matcher, &crusher, &target)? {
            db.db.insert_match(&crusher, &target)?;
            return Ok(true);
        }
        Ok(false)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))?
    .map_err(|e| ApiError::storage("Failed to save your crush. Please try again!", e))?;

    let message = if matched {
        "Your secret love has been sent... and guess what? IT'S A MATCH!"
    } else {
        "Your secret love has been sent!"
    };

    Ok(Json(CrushResponse {
        success: true,
        message: message.to_string(),
        submission_id: Some(submission_id),
    }))
}

/// DELETE /api/crush/{wallet_address}/{crush_hash} — withdraw a submission.
/// Deleting a row that was never there still reports success.
pub async fn remove(
    State(state): State<AppState>,
    Path((wallet_address, crush_hash)): Path<(String, String)>,
) -> Result<Json<RemoveCrushResponse>, ApiError> {
    let db = state.clone();
    let removed =
        tokio::task::spawn_blocking(move || db.db.delete_crush(&wallet_address, &crush_hash))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?
            .map_err(|e| ApiError::storage("Failed to remove your crush. Please try again!", e))?;

    if !removed {
        debug!("delete matched no crush row");
    }

    Ok(Json(RemoveCrushResponse {
        success: true,
        message: "Crush removed. It's okay, hearts change!".to_string(),
    }))
}
