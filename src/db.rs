use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::{debug, info};

use crate::models::{Bug, BugState};

const SCHEMA_VERSION: i32 = 1;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open database")?;
        let db = Database { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "opened bug database");
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .context("Failed to read schema version")?;

        if version < SCHEMA_VERSION {
            self.conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS bugs (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    state TEXT NOT NULL CHECK (state IN ('open', 'closed')),
                    timestamp INTEGER NOT NULL,
                    comment TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_bugs_state ON bugs(state);
                "#,
            )?;

            self.conn
                .execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
            info!(version = SCHEMA_VERSION, "initialized bug schema");
        }

        Ok(())
    }

    pub fn add_bug(&self, bug: &Bug) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO bugs (state, timestamp, comment, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                bug.state().as_str(),
                bug.timestamp().timestamp(),
                bug.comment(),
                now
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, state = %bug.state(), "added bug");
        Ok(id)
    }

    /// Insert all bugs in one transaction; either every bug is stored or none.
    pub fn add_bugs(&mut self, bugs: &[Bug]) -> Result<Vec<i64>> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(bugs.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO bugs (state, timestamp, comment, created_at) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for bug in bugs {
                stmt.execute(params![
                    bug.state().as_str(),
                    bug.timestamp().timestamp(),
                    bug.comment(),
                    now
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        debug!(count = ids.len(), "added bugs");
        Ok(ids)
    }

    pub fn list_bugs(&self) -> Result<Vec<Bug>> {
        let mut stmt = self
            .conn
            .prepare("SELECT state, timestamp, comment FROM bugs ORDER BY id")?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredBug::into_bug).collect()
    }

    pub fn list_bugs_by_state(&self, state: BugState) -> Result<Vec<Bug>> {
        let mut stmt = self
            .conn
            .prepare("SELECT state, timestamp, comment FROM bugs WHERE state = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map([state.as_str()], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredBug::into_bug).collect()
    }

    pub fn count_bugs(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bugs", [], |row| row.get(0))?;
        Ok(count)
    }
}

struct StoredBug {
    state: String,
    timestamp: i64,
    comment: String,
}

impl StoredBug {
    fn into_bug(self) -> Result<Bug> {
        let state: BugState = self.state.parse()?;
        let timestamp = DateTime::<Utc>::from_timestamp(self.timestamp, 0)
            .ok_or_else(|| anyhow!("Stored timestamp {} is out of range", self.timestamp))?;
        Ok(Bug::new(state, timestamp, self.comment))
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<StoredBug> {
    Ok(StoredBug {
        state: row.get(0)?,
        timestamp: row.get(1)?,
        comment: row.get(2)?,
    })
}
