use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Wallet --

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub success: bool,
    pub message: String,
    pub wallet_address: String,
}

// -- Crushes --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrushSubmission {
    pub crusher_address: String,
    pub crush_address: String,
}

#[derive(Debug, Serialize)]
pub struct CrushResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemoveCrushResponse {
    pub success: bool,
    pub message: String,
}

// -- Matches --

#[derive(Debug, Serialize)]
pub struct MatchNotification {
    pub your_address: String,
    pub matched_address: String,
    pub matched_at: DateTime<Utc>,
    pub message: String,
}

/// `proof` is only present when `is_match` is true.
#[derive(Debug, Serialize)]
pub struct CheckMatchResponse {
    pub is_match: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub wallet_address: String,
    pub crushes_sent: u32,
    pub matches_count: u32,
    pub matches: Vec<String>,
}

// -- Compatibility --

#[derive(Debug, Serialize)]
pub struct CompatibilityResult {
    /// Compatibility score 0-100.
    pub score: u8,
    pub level: String,
    /// Level index 0-4.
    pub level_index: usize,
    pub emoji: String,
    pub message: String,
    pub color: String,
}

// -- Service --

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub tagline: String,
    pub powered_by: String,
    pub docs: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub fhe_enabled: bool,
}
