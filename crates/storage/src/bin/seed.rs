use std::fmt;

use centurion_core::model::UserProgress;
use centurion_core::progression::{advance_after_workout, parse_rep_count};
use chrono::{DateTime, Duration, Utc};
use storage::ProgressRecord;
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    max_reps: u32,
    workouts: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMax { raw: String },
    InvalidWorkouts { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMax { raw } => write!(f, "invalid --max value: {raw}"),
            ArgsError::InvalidWorkouts { raw } => write!(f, "invalid --workouts value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

const DEFAULT_DB_URL: &str = "sqlite:dev.sqlite3";

/// File-backed URLs get `mode=rwc` so a fresh checkout can seed without
/// creating the database file first.
fn with_create_mode(db_url: String) -> String {
    if db_url.contains(":memory:") || db_url.contains("mode=") {
        return db_url;
    }
    let separator = if db_url.contains('?') { '&' } else { '?' };
    format!("{db_url}{separator}mode=rwc")
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("CENTURION_DB_URL")
            .unwrap_or_else(|_| DEFAULT_DB_URL.into());
        let mut max_reps = 25;
        let mut workouts = 6;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--max" => {
                    let value = require_value(&mut args, "--max")?;
                    max_reps = parse_rep_count(&value)
                        .map_err(|_| ArgsError::InvalidMax { raw: value.clone() })?;
                }
                "--workouts" => {
                    let value = require_value(&mut args, "--workouts")?;
                    workouts = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidWorkouts { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url: with_create_mode(db_url),
            max_reps,
            workouts,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --max <reps>              Assessment max used for onboarding (default: 25)");
    eprintln!("  --workouts <n>            Completed workouts to simulate (default: 6)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CENTURION_DB_URL");
}

/// Onboard `workouts * 2` days ago and complete one workout every other day.
fn demo_progress(max_reps: u32, workouts: u32, now: DateTime<Utc>) -> UserProgress {
    let start = now - Duration::days(i64::from(workouts) * 2);
    (0..workouts).fold(UserProgress::onboard(max_reps, start), |progress, idx| {
        advance_after_workout(progress, start + Duration::days(i64::from(idx) * 2))
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let mut progress = demo_progress(args.max_reps, args.workouts, now);
    progress.sync_day(now.date_naive());
    storage
        .progress
        .save_progress(&ProgressRecord::from_progress(&progress))
        .await?;

    println!(
        "Seeded max {} with {} workouts (now at phase {}, week {}, day {}) into {}",
        args.max_reps,
        args.workouts,
        progress.current_phase,
        progress.current_week,
        progress.current_day,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
