use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use bugsift::db::Database;
use bugsift::models::{Bug, BugState};

pub fn parse_state(state: &str) -> Result<BugState> {
    Ok(state.parse::<BugState>()?)
}

pub fn parse_timestamp(secs: Option<i64>) -> Result<DateTime<Utc>> {
    match secs {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow!("Invalid timestamp {}: out of range", secs)),
        None => Ok(Utc::now()),
    }
}

pub fn run(db: &Database, comment: &str, state: &str, timestamp: Option<i64>) -> Result<()> {
    let state = parse_state(state)?;
    let timestamp = parse_timestamp(timestamp)?;

    let bug = Bug::new(state, timestamp, comment);
    let id = db.add_bug(&bug)?;
    println!("Added {} bug #{}", state, id);
    Ok(())
}
