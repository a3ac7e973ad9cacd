mod commands;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use bugsift::classifier::AgeRange;
use bugsift::db::Database;

use commands::init::{BUGSIFT_DIR, DB_FILE};

#[derive(Parser)]
#[command(name = "bugsift")]
#[command(about = "A small bug tracker that buckets bugs by age and state")]
#[command(version)]
struct Cli {
    /// Log filter (e.g. warn, debug, bugsift=trace)
    #[arg(long, global = true, env = "BUGSIFT_LOG", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to the .bugsift directory (default: search upwards from cwd)
    #[arg(long, global = true, env = "BUGSIFT_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize bugsift in the current directory (or at --dir)
    Init,

    /// Record a bug
    Add {
        /// Bug comment
        comment: String,
        /// State (open, closed)
        #[arg(short, long, default_value = "open")]
        state: String,
        /// When the bug was reported, in seconds since the epoch (default: now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },

    /// Import bugs from a JSON array or JSON-lines file
    Import {
        /// Input file
        file: PathBuf,
    },

    /// List stored bugs
    List {
        /// Filter by state (open, closed)
        #[arg(short, long)]
        state: Option<String>,
        /// Show bug counts per age range instead of the bugs
        #[arg(long)]
        summary: bool,
    },

    /// Find bugs by age range and state
    Find {
        /// Age range (past-day, past-week, past-month, other)
        #[arg(short, long)]
        range: String,
        /// Filter by state (open, closed); closed bugs are listed first when omitted
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Export all bugs as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn find_bugsift_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            bail!("Bugsift directory {} does not exist", dir.display());
        }
        return Ok(dir.to_path_buf());
    }

    let mut current = env::current_dir()?;

    loop {
        let candidate = current.join(BUGSIFT_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }

        if !current.pop() {
            bail!("Not a bugsift repository (or any parent). Run 'bugsift init' first.");
        }
    }
}

fn get_db(explicit: Option<&Path>) -> Result<Database> {
    let bugsift_dir = find_bugsift_dir(explicit)?;
    let db_path = bugsift_dir.join(DB_FILE);
    Database::open(&db_path).context("Failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);
    let dir = cli.dir.as_deref();

    match cli.command {
        Commands::Init => {
            let cwd = env::current_dir()?;
            commands::init::run(&commands::init::target_dir(dir, &cwd))
        }

        Commands::Add {
            comment,
            state,
            timestamp,
        } => {
            let db = get_db(dir)?;
            commands::add::run(&db, &comment, &state, timestamp)
        }

        Commands::Import { file } => {
            let mut db = get_db(dir)?;
            commands::import::run(&mut db, &file)
        }

        Commands::List { state, summary } => {
            let state = state.as_deref().map(commands::add::parse_state).transpose()?;
            let db = get_db(dir)?;
            commands::list::run(&db, state, summary)
        }

        Commands::Find { range, state } => {
            let range: AgeRange = range.parse()?;
            let state = state.as_deref().map(commands::add::parse_state).transpose()?;
            let db = get_db(dir)?;
            commands::find::run(&db, state, range)
        }

        Commands::Export { output } => {
            let db = get_db(dir)?;
            commands::export::run(&db, output.as_deref())
        }
    }
}
