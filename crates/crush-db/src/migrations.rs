use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS crushes (
            id                   TEXT PRIMARY KEY,
            crusher_address      TEXT NOT NULL,
            crush_address_sealed TEXT NOT NULL,
            crush_address_hash   TEXT NOT NULL,
            created_at           TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(crusher_address, crush_address_hash)
        );

        CREATE INDEX IF NOT EXISTS idx_crushes_crusher
            ON crushes(crusher_address);

        -- Pair is sorted before insert, so the UNIQUE constraint is
        -- order-independent.
        CREATE TABLE IF NOT EXISTS matches (
            id            TEXT PRIMARY KEY,
            user1_address TEXT NOT NULL,
            user2_address TEXT NOT NULL,
            matched_at    TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(user1_address, user2_address)
        );

        CREATE INDEX IF NOT EXISTS idx_matches_user2
            ON matches(user2_address);

        CREATE TABLE IF NOT EXISTS users (
            wallet_address TEXT PRIMARY KEY,
            nickname       TEXT,
            avatar_seed    TEXT,
            created_at     TEXT NOT NULL DEFAULT (datetime('now')),
            last_active    TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
