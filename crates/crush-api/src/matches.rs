use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crush_db::Database;
use crush_match::Matcher;
use crush_match::matcher::normalize;
use crush_types::api::{CheckMatchResponse, MatchNotification, UserStats};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckMatchParams {
    pub address1: String,
    pub address2: String,
}

/// Bidirectional keyed-hash check against stored crushes: A's crush hash
/// names B and B's names A.
pub(crate) fn mutual_crush_exists(
    db: &Database,
    matcher: &Matcher,
    address1: &str,
    address2: &str,
) -> anyhow::Result<bool> {
    let hash1 = matcher.address_hash(address1);
    let hash2 = matcher.address_hash(address2);

    let a_likes_b = db.has_crush_on(address1, &hash2)?;
    let b_likes_a = db.has_crush_on(address2, &hash1)?;
    Ok(a_likes_b && b_likes_a)
}

/// GET /api/matches/{wallet_address} — every confirmed match for an address.
pub async fn list(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<Vec<MatchNotification>>, ApiError> {
    let your_address = normalize(&wallet_address);

    let db = state.clone();
    let address = wallet_address.clone();
    let partners = tokio::task::spawn_blocking(move || db.db.matches_for_user(&address))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(|e| ApiError::storage("Failed to load your matches. Please try again!", e))?;

    let notifications = partners
        .into_iter()
        .map(|partner| MatchNotification {
            your_address: your_address.clone(),
            matched_address: partner.address,
            matched_at: parse_sqlite_timestamp(&partner.matched_at),
            message: "You both like each other!".to_string(),
        })
        .collect();

    Ok(Json(notifications))
}

/// GET /api/stats/{wallet_address} — crushes sent plus the match list.
pub async fn stats(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Json<UserStats>, ApiError> {
    let db = state.clone();
    let address = wallet_address.clone();
    let stats = tokio::task::spawn_blocking(move || db.db.user_stats(&address))
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .map_err(|e| ApiError::storage("Failed to load your stats. Please try again!", e))?;

    Ok(Json(UserStats {
        wallet_address,
        crushes_sent: stats.crushes_sent,
        matches_count: stats.matches.len() as u32,
        matches: stats.matches.into_iter().map(|p| p.address).collect(),
    }))
}

/// GET /api/check-match — explicit mutual check between two addresses. Pure
/// read; matches are recorded at submission time.
pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckMatchParams>,
) -> Result<Json<CheckMatchResponse>, ApiError> {
    let db = state.clone();
    let address1 = params.address1.clone();
    let address2 = params.address2.clone();
    let is_match = tokio::task::spawn_blocking(move || {
        mutual_crush_exists(&db.db, &db.matcher, &address1, &address2)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))?
    .map_err(|e| ApiError::storage("Failed to check for a match. Please try again!", e))?;

    if !is_match {
        return Ok(Json(CheckMatchResponse {
            is_match: false,
            message: "No match yet... keep hoping!".to_string(),
            proof: None,
        }));
    }

    let proof = state
        .matcher
        .create_proof(&params.address1, &params.address2)
        .map_err(ApiError::Internal)?;

    Ok(Json(CheckMatchResponse {
        is_match: true,
        message: "It's a Match! You both like each other!".to_string(),
        proof: Some(proof),
    }))
}

fn parse_sqlite_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            // Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt matched_at '{}': {}", raw, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::parse_sqlite_timestamp;

    #[test]
    fn parses_sqlite_and_rfc3339_timestamps() {
        let sqlite = parse_sqlite_timestamp("2026-02-14 12:34:56");
        assert_eq!(sqlite.to_rfc3339(), "2026-02-14T12:34:56+00:00");

        let rfc = parse_sqlite_timestamp("2026-02-14T12:34:56Z");
        assert_eq!(rfc, sqlite);
    }

    #[test]
    fn corrupt_timestamp_falls_back_to_epoch() {
        let parsed = parse_sqlite_timestamp("definitely not a date");
        assert_eq!(parsed, chrono::DateTime::<chrono::Utc>::default());
    }
}
