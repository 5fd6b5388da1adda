use anyhow::Result;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::Database;
use crate::models::{CrushRow, MatchPartner, UserRow, UserStatsRow};

/// Canonical stored form of an address. Every query goes through this, so
/// lookups are case-insensitive no matter what the caller sends.
fn canon(address: &str) -> String {
    address.trim().to_lowercase()
}

impl Database {
    // -- Crushes --

    /// Insert or overwrite a crush. One row per (submitter, target-hash)
    /// pair; resubmission refreshes the sealed blob and timestamp but keeps
    /// the row id.
    pub fn upsert_crush(&self, crusher_address: &str, sealed: &str, hash: &str) -> Result<()> {
        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO crushes (id, crusher_address, crush_address_sealed, crush_address_hash)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(crusher_address, crush_address_hash) DO UPDATE SET
                     crush_address_sealed = excluded.crush_address_sealed,
                     created_at = datetime('now')",
                rusqlite::params![id, canon(crusher_address), sealed, hash.to_lowercase()],
            )?;
            Ok(())
        })
    }

    pub fn crushes_by_user(&self, wallet_address: &str) -> Result<Vec<CrushRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, crusher_address, crush_address_sealed, crush_address_hash, created_at
                 FROM crushes WHERE crusher_address = ?1
                 ORDER BY created_at DESC",
            )?;

            let rows = stmt
                .query_map([canon(wallet_address)], |row| {
                    Ok(CrushRow {
                        id: row.get(0)?,
                        crusher_address: row.get(1)?,
                        crush_address_sealed: row.get(2)?,
                        crush_address_hash: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Does `crusher_address` have a stored crush whose target hash is `hash`?
    pub fn has_crush_on(&self, crusher_address: &str, hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM crushes WHERE crusher_address = ?1 AND crush_address_hash = ?2",
                    rusqlite::params![canon(crusher_address), hash.to_lowercase()],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Returns true if a row was removed.
    pub fn delete_crush(&self, crusher_address: &str, hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM crushes WHERE crusher_address = ?1 AND crush_address_hash = ?2",
                rusqlite::params![canon(crusher_address), hash.to_lowercase()],
            )?;
            Ok(removed > 0)
        })
    }

    // -- Matches --

    /// Record a match. The pair is sorted before insert so storage is
    /// order-independent; returns false if the pair was already recorded.
    pub fn insert_match(&self, address1: &str, address2: &str) -> Result<bool> {
        let mut pair = [canon(address1), canon(address2)];
        pair.sort();

        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO matches (id, user1_address, user2_address)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![id, pair[0], pair[1]],
            )?;
            Ok(inserted > 0)
        })
    }

    /// All match partners for an address, with the stored match timestamp.
    pub fn matches_for_user(&self, wallet_address: &str) -> Result<Vec<MatchPartner>> {
        let me = canon(wallet_address);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT user1_address, user2_address, matched_at FROM matches
                 WHERE user1_address = ?1 OR user2_address = ?1
                 ORDER BY matched_at DESC",
            )?;

            let rows = stmt
                .query_map([&me], |row| {
                    let user1: String = row.get(0)?;
                    let user2: String = row.get(1)?;
                    let matched_at: String = row.get(2)?;
                    Ok((user1, user2, matched_at))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows
                .into_iter()
                .map(|(user1, user2, matched_at)| MatchPartner {
                    address: if user1 == me { user2 } else { user1 },
                    matched_at,
                })
                .collect())
        })
    }

    pub fn user_stats(&self, wallet_address: &str) -> Result<UserStatsRow> {
        let crushes_sent = self.with_conn(|conn| {
            let count: u32 = conn.query_row(
                "SELECT COUNT(*) FROM crushes WHERE crusher_address = ?1",
                [canon(wallet_address)],
                |row| row.get(0),
            )?;
            Ok(count)
        })?;

        let matches = self.matches_for_user(wallet_address)?;

        Ok(UserStatsRow {
            crushes_sent,
            matches,
        })
    }

    // -- Users --

    /// Register a wallet or touch an existing one. A nickname passed as None
    /// leaves any stored nickname in place.
    pub fn upsert_user(&self, wallet_address: &str, nickname: Option<&str>) -> Result<()> {
        let address = canon(wallet_address);
        let avatar_seed: String = address.chars().take(8).collect();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (wallet_address, nickname, avatar_seed)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(wallet_address) DO UPDATE SET
                     last_active = datetime('now'),
                     nickname = COALESCE(?2, nickname)",
                rusqlite::params![address, nickname, avatar_seed],
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, wallet_address: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT wallet_address, nickname, avatar_seed, created_at, last_active
                     FROM users WHERE wallet_address = ?1",
                    [canon(wallet_address)],
                    |row| {
                        Ok(UserRow {
                            wallet_address: row.get(0)?,
                            nickname: row.get(1)?,
                            avatar_seed: row.get(2)?,
                            created_at: row.get(3)?,
                            last_active: row.get(4)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}
