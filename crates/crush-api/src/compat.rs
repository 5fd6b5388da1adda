use axum::{Json, extract::Query};
use serde::Deserialize;

use crush_match::matcher::normalize;
use crush_match::score::{TIERS, compatibility_score, pick_message, tier_index};
use crush_types::api::CompatibilityResult;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CompatibilityParams {
    pub address1: String,
    pub address2: String,
}

/// GET /api/compatibility — deterministic cosmetic score for a pair of
/// addresses. No storage involved.
pub async fn check(
    Query(params): Query<CompatibilityParams>,
) -> Result<Json<CompatibilityResult>, ApiError> {
    if params.address1.trim().is_empty() || params.address2.trim().is_empty() {
        return Err(ApiError::BadRequest("Both addresses are required".into()));
    }
    if normalize(&params.address1) == normalize(&params.address2) {
        return Err(ApiError::BadRequest(
            "Cannot check compatibility with yourself!".into(),
        ));
    }

    let score = compatibility_score(&params.address1, &params.address2);
    let level_index = tier_index(score);
    let tier = &TIERS[level_index];

    Ok(Json(CompatibilityResult {
        score,
        level: tier.level.to_string(),
        level_index,
        emoji: tier.emoji.to_string(),
        message: pick_message(&params.address1, &params.address2, tier).to_string(),
        color: tier.color.to_string(),
    }))
}
