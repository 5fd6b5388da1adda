/// Database row types — these map directly to SQLite rows. Distinct from the
/// crush-types API models to keep the DB layer independent.

pub struct CrushRow {
    pub id: String,
    pub crusher_address: String,
    pub crush_address_sealed: String,
    pub crush_address_hash: String,
    pub created_at: String,
}

pub struct MatchPartner {
    pub address: String,
    pub matched_at: String,
}

pub struct UserRow {
    pub wallet_address: String,
    pub nickname: Option<String>,
    pub avatar_seed: Option<String>,
    pub created_at: String,
    pub last_active: String,
}

pub struct UserStatsRow {
    pub crushes_sent: u32,
    pub matches: Vec<MatchPartner>,
}
