use rusqlite::{Connection, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::Config;

/// Per-user roleplay action counters (how many hugs sent/received, etc).
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(config: &Config) -> Result<Self> {
        let conn = Connection::open(&config.database_url)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn execute_init(&self) -> anyhow::Result<()> {
        info!("Database: Initializing schema...");
        let sql = "
            CREATE TABLE IF NOT EXISTS roleplay_stats (
                guild_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                action TEXT NOT NULL,
                sent INTEGER NOT NULL DEFAULT 0,
                received INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (guild_id, user_id, action)
            );
        ";
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql)?;
        debug!("Database: Schema initialized successfully");
        Ok(())
    }

    /// Bump the sender's sent counter and the target's received counter for
    /// one action, returning the new totals `(sent, received)`.
    pub fn bump_roleplay(
        &self,
        guild_id: u64,
        sender_id: u64,
        target_id: Option<u64>,
        action: &str,
    ) -> anyhow::Result<(i64, i64)> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO roleplay_stats (guild_id, user_id, action, sent, received)
             VALUES (?1, ?2, ?3, 1, 0)
             ON CONFLICT(guild_id, user_id, action) DO UPDATE SET sent = sent + 1",
            (guild_id.to_string(), sender_id.to_string(), action),
        )?;
        let mut received = 0;
        if let Some(target_id) = target_id {
            conn.execute(
                "INSERT INTO roleplay_stats (guild_id, user_id, action, sent, received)
                 VALUES (?1, ?2, ?3, 0, 1)
                 ON CONFLICT(guild_id, user_id, action) DO UPDATE SET received = received + 1",
                (guild_id.to_string(), target_id.to_string(), action),
            )?;
            received = self.get_count(&conn, guild_id, target_id, action, "received")?;
        }
        let sent = self.get_count(&conn, guild_id, sender_id, action, "sent")?;
        Ok((sent, received))
    }

    fn get_count(
        &self,
        conn: &Connection,
        guild_id: u64,
        user_id: u64,
        action: &str,
        column: &str,
    ) -> anyhow::Result<i64> {
        // column comes from a fixed set, never user input
        let sql = format!(
            "SELECT {column} FROM roleplay_stats WHERE guild_id = ?1 AND user_id = ?2 AND action = ?3"
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query((guild_id.to_string(), user_id.to_string(), action))?;
        if let Some(row) = rows.next()? {
            Ok(row.get(0)?)
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let config = Config {
            discord_token: "test".to_string(),
            tmdb_api_key: "test".to_string(),
            googlemaps_api_key: None,
            vision_api_key: None,
            database_url: ":memory:".to_string(),
            status_message: "test".to_string(),
            command_prefix: "!".to_string(),
            http_timeout_secs: 30,
            choice_timeout_secs: 60,
            view_timeout_secs: 600,
            page_timeout_secs: 120,
            dev_guild_id: None,
            register_commands: false,
        };
        let db = Database::new(&config).unwrap();
        db.execute_init().unwrap();
        db
    }

    #[test]
    fn test_bump_roleplay_counters() {
        let db = test_db();

        let (sent, received) = db.bump_roleplay(1, 10, Some(20), "hug").unwrap();
        assert_eq!((sent, received), (1, 1));

        let (sent, received) = db.bump_roleplay(1, 10, Some(20), "hug").unwrap();
        assert_eq!((sent, received), (2, 2));

        // different action tracked independently
        let (sent, _) = db.bump_roleplay(1, 10, Some(20), "slap").unwrap();
        assert_eq!(sent, 1);

        // different guild tracked independently
        let (sent, _) = db.bump_roleplay(2, 10, Some(20), "hug").unwrap();
        assert_eq!(sent, 1);
    }

    #[test]
    fn test_bump_without_target() {
        let db = test_db();
        let (sent, received) = db.bump_roleplay(1, 10, None, "cry").unwrap();
        assert_eq!((sent, received), (1, 0));
        let (sent, _) = db.bump_roleplay(1, 10, None, "cry").unwrap();
        assert_eq!(sent, 2);
    }
}
