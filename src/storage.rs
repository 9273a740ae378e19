/// Local token store for the admin console
///
/// Keeps the bearer token between invocations in a small SQLite file,
/// one row per profile.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

pub const DEFAULT_PROFILE: &str = "default";

pub struct TokenStore {
    conn: Connection,
}

impl TokenStore {
    /// Open (or create) the token store at the given database path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests and one-shot sessions
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;
        Ok(Self { conn })
    }

    fn initialize(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS auth_tokens (
                profile TEXT PRIMARY KEY,
                token TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Save the token for a profile, replacing any previous one
    pub fn save_token(&self, profile: &str, token: &str) -> Result<()> {
        let saved_at = chrono::Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT OR REPLACE INTO auth_tokens (profile, token, saved_at) VALUES (?1, ?2, ?3)",
            (profile, token, saved_at),
        )?;

        log::debug!("Saved auth token for profile {}", profile);
        Ok(())
    }

    pub fn load_token(&self, profile: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT token FROM auth_tokens WHERE profile = ?1")?;

        let token = stmt
            .query_row((profile,), |row| row.get::<_, String>(0))
            .optional()?;

        Ok(token)
    }

    /// Remove the token for a profile. Returns whether a token was present.
    pub fn clear_token(&self, profile: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM auth_tokens WHERE profile = ?1", (profile,))?;
        Ok(removed > 0)
    }
}
