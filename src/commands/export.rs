use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};

use bugsift::db::Database;

pub fn to_json(db: &Database) -> Result<String> {
    let bugs = db.list_bugs()?;
    Ok(serde_json::to_string_pretty(&bugs)?)
}

pub fn run(db: &Database, output_path: Option<&str>) -> Result<()> {
    let json = to_json(db)?;

    match output_path {
        Some(path) => {
            fs::write(path, &json).context("Failed to write export file")?;
            eprintln!("Exported {} bugs to {}", db.count_bugs()?, path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
