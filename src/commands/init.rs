use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use bugsift::db::Database;

pub const BUGSIFT_DIR: &str = ".bugsift";
pub const DB_FILE: &str = "bugs.db";

/// Where `init` creates the store: the explicit directory if one was given,
/// otherwise `.bugsift` under `cwd`.
pub fn target_dir(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => cwd.join(BUGSIFT_DIR),
    }
}

pub fn run(bugsift_dir: &Path) -> Result<()> {
    if bugsift_dir.join(DB_FILE).exists() {
        println!("Already initialized at {}", bugsift_dir.display());
        return Ok(());
    }

    fs::create_dir_all(bugsift_dir)
        .with_context(|| format!("Failed to create {}", bugsift_dir.display()))?;
    Database::open(&bugsift_dir.join(DB_FILE))?;
    println!("Created {}", bugsift_dir.display());

    println!("Bugsift initialized successfully!");
    println!("\nNext steps:");
    println!("  bugsift add \"Crash on save\"        # Record a bug");
    println!("  bugsift find --range past-day     # Bugs from the last 24 hours");

    Ok(())
}
