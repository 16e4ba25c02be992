use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use centurion_core::guide::GuideTopic;
use centurion_core::model::Theme;
use centurion_core::program::rest_interval_for;
use centurion_core::tools::{RestTimer, TimerTick, tempo_cue};
use services::{AppServices, Clock};
use tracing_subscriber::EnvFilter;

mod render;

const DEFAULT_DB_URL: &str = "sqlite://centurion.sqlite3";
const DEFAULT_EXPORT_PATH: &str = "centurion_data.json";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { command: &'static str, what: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { raw: String },
    InvalidDays { raw: String },
    InvalidTheme { raw: String },
    InvalidGuideTopic { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { command, what } => {
                write!(f, "{command} requires {what}")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { raw } => write!(f, "invalid number: {raw}"),
            ArgsError::InvalidDays { raw } => {
                write!(f, "invalid day list (expected e.g. 1,3,5 with 0 = Sunday): {raw}")
            }
            ArgsError::InvalidTheme { raw } => write!(f, "invalid theme (dark|light|toggle): {raw}"),
            ArgsError::InvalidGuideTopic { raw } => {
                write!(f, "invalid guide topic (system|doctor|nutrition|mind): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReminderAction {
    On,
    Off,
    Toggle,
    Time(String),
    Days(Vec<u8>),
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Onboard { reps: String },
    Status,
    Workout,
    Complete,
    Max { reps: String, recalculate: bool },
    Goal { goal: u32 },
    Reminders(ReminderAction),
    Calendar,
    Plan,
    Chart,
    Timer { secs: Option<u32> },
    Coach { question: String },
    Export { path: PathBuf },
    Reset { confirmed: bool },
    Theme(ThemeAction),
    Guide(GuideTopic),
}

#[derive(Debug)]
struct Args {
    db_url: String,
    verbose: bool,
    command: Command,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  centurion [--db <sqlite_url>] [--verbose] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  onboard <reps>                 Start the program from a max-rep assessment");
    eprintln!("  status                         Dashboard for today (default)");
    eprintln!("  workout                        Today's prescription");
    eprintln!("  complete                       Mark today's workout as done");
    eprintln!("  max <reps> [--recalculate]     Record a max test, optionally re-plan");
    eprintln!("  goal <n>                       Set the daily push-up goal");
    eprintln!("  reminders [on|off|toggle|time HH:MM|days 1,3,5]");
    eprintln!("  calendar                       This month's training calendar");
    eprintln!("  plan                           The 20-week program map");
    eprintln!("  chart                          Max-test history");
    eprintln!("  timer [secs]                   Rest countdown with tempo guide");
    eprintln!("  coach <question...>            Ask the AI coach");
    eprintln!("  export [path]                  Write the record as JSON (default: {DEFAULT_EXPORT_PATH})");
    eprintln!("  reset --yes                    Delete all progress");
    eprintln!("  theme [dark|light|toggle]      Show or change the theme");
    eprintln!("  guide [system|doctor|nutrition|mind]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CENTURION_DB_URL (default: {DEFAULT_DB_URL}), RUST_LOG");
    eprintln!("  CENTURION_AI_API_KEY, CENTURION_AI_MODEL, CENTURION_AI_BASE_URL, CENTURION_THEME");
}

impl Args {
    fn parse(
        argv: impl IntoIterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut db_url = env_db_url.map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut verbose = false;
        let mut rest = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Ok(None),
                _ => rest.push(arg),
            }
        }

        let command = parse_command(rest)?;
        Ok(Some(Self {
            db_url,
            verbose,
            command,
        }))
    }
}

fn parse_number(raw: &str) -> Result<u32, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        raw: raw.to_owned(),
    })
}

fn parse_days(raw: &str) -> Result<Vec<u8>, ArgsError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ArgsError::InvalidDays {
            raw: raw.to_owned(),
        })
}

fn parse_command(tokens: Vec<String>) -> Result<Command, ArgsError> {
    let mut flags = Vec::new();
    let mut positional = Vec::new();
    for token in tokens {
        if token.starts_with("--") {
            flags.push(token);
        } else {
            positional.push(token);
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().unwrap_or_else(|| "status".to_owned());
    let mut recalculate = false;
    let mut confirmed = false;
    for flag in flags {
        match (name.as_str(), flag.as_str()) {
            ("max", "--recalculate") => recalculate = true,
            ("reset", "--yes") => confirmed = true,
            _ => return Err(ArgsError::UnknownArg(flag)),
        }
    }
    let args: Vec<String> = positional.collect();
    let first = args.first().map(String::as_str);

    let command = match name.as_str() {
        "onboard" => Command::Onboard {
            reps: first
                .ok_or(ArgsError::MissingArgument {
                    command: "onboard",
                    what: "a rep count",
                })?
                .to_owned(),
        },
        "status" => Command::Status,
        "workout" => Command::Workout,
        "complete" => Command::Complete,
        "max" => Command::Max {
            reps: first
                .ok_or(ArgsError::MissingArgument {
                    command: "max",
                    what: "a rep count",
                })?
                .to_owned(),
            recalculate,
        },
        "goal" => Command::Goal {
            goal: parse_number(first.ok_or(ArgsError::MissingArgument {
                command: "goal",
                what: "a number",
            })?)?,
        },
        "reminders" => Command::Reminders(match first {
            None => ReminderAction::Show,
            Some("on") => ReminderAction::On,
            Some("off") => ReminderAction::Off,
            Some("toggle") => ReminderAction::Toggle,
            Some("time") => ReminderAction::Time(args.get(1).cloned().ok_or(
                ArgsError::MissingArgument {
                    command: "reminders time",
                    what: "HH:MM",
                },
            )?),
            Some("days") => ReminderAction::Days(parse_days(args.get(1).ok_or(
                ArgsError::MissingArgument {
                    command: "reminders days",
                    what: "a day list",
                },
            )?)?),
            Some(other) => return Err(ArgsError::UnknownArg(other.to_owned())),
        }),
        "calendar" => Command::Calendar,
        "plan" => Command::Plan,
        "chart" => Command::Chart,
        "timer" => Command::Timer {
            secs: first.map(parse_number).transpose()?,
        },
        "coach" => {
            let question = args.join(" ");
            if question.trim().is_empty() {
                return Err(ArgsError::MissingArgument {
                    command: "coach",
                    what: "a question",
                });
            }
            Command::Coach { question }
        }
        "export" => Command::Export {
            path: PathBuf::from(first.unwrap_or(DEFAULT_EXPORT_PATH)),
        },
        "reset" => Command::Reset { confirmed },
        "theme" => Command::Theme(match first {
            None => ThemeAction::Show,
            Some("toggle") => ThemeAction::Toggle,
            Some(raw) => ThemeAction::Set(raw.parse().map_err(|_| ArgsError::InvalidTheme {
                raw: raw.to_owned(),
            })?),
        }),
        "guide" => Command::Guide(match first {
            None => GuideTopic::default(),
            Some(raw) => raw.parse().map_err(|_| ArgsError::InvalidGuideTopic {
                raw: raw.to_owned(),
            })?,
        }),
        other => return Err(ArgsError::UnknownCommand(other.to_owned())),
    };
    Ok(command)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_timer(mut timer: RestTimer) {
    let started = Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    timer.toggle();
    // The first tick of an interval fires immediately.
    ticker.tick().await;
    println!("{}", render::timer_line(&timer, tempo_cue(started.elapsed())));
    loop {
        ticker.tick().await;
        match timer.tick() {
            TimerTick::Running { .. } => {
                println!("{}", render::timer_line(&timer, tempo_cue(started.elapsed())));
            }
            TimerTick::Finished | TimerTick::Idle => break,
        }
    }
    println!("Rest over. Next set!");
}

async fn execute(app: &AppServices, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let progress = app.progress();
    match command {
        Command::Onboard { reps } => {
            let record = progress.onboard(&reps).await?;
            println!("Welcome to the program. {}", render::progress_line(&record));
            println!();
            println!(
                "{}",
                render::workout(&record.todays_workout(), record.rest_interval_secs())
            );
        }
        Command::Status => match progress.load().await? {
            None => println!("No progress yet. Start with `centurion onboard <max reps>`."),
            Some(_) => println!("{}", render::dashboard(&progress.dashboard().await?)),
        },
        Command::Workout => {
            let summary = progress.dashboard().await?;
            let rest = rest_interval_for(summary.position.phase);
            println!("{}", render::workout(&summary.workout, rest));
        }
        Command::Complete => {
            let record = progress.complete_workout().await?;
            println!("Workout logged. {}", render::progress_line(&record));
        }
        Command::Max { reps, recalculate } => {
            let record = progress.record_max(&reps, recalculate).await?;
            println!("New max saved. {}", render::progress_line(&record));
        }
        Command::Goal { goal } => {
            let record = progress.set_daily_goal(goal).await?;
            println!("Daily goal set to {}.", record.daily_goal);
        }
        Command::Reminders(action) => {
            let record = match action {
                ReminderAction::Show => progress.load().await?.ok_or(
                    services::ProgressServiceError::NotOnboarded,
                )?,
                ReminderAction::On => progress.set_reminders_enabled(true).await?,
                ReminderAction::Off => progress.set_reminders_enabled(false).await?,
                ReminderAction::Toggle => progress.toggle_reminders().await?,
                ReminderAction::Time(raw) => progress.set_reminder_time(&raw).await?,
                ReminderAction::Days(days) => progress.set_reminder_days(&days).await?,
            };
            println!("{}", render::reminders(&record.reminders));
        }
        Command::Calendar => println!("{}", render::calendar(&progress.calendar().await?)),
        Command::Plan => println!("{}", render::program_map(&progress.program_map().await?)),
        Command::Chart => println!("{}", render::chart(&progress.chart().await?)),
        Command::Timer { secs } => {
            let timer = match secs {
                Some(secs) => RestTimer::new(secs),
                None => match progress.load().await? {
                    Some(record) => RestTimer::for_phase(record.current_phase),
                    None => RestTimer::for_phase(0),
                },
            };
            run_timer(timer).await;
        }
        Command::Coach { question } => {
            let stats = progress
                .load()
                .await?
                .ok_or(services::ProgressServiceError::NotOnboarded)?
                .stats_summary();
            let mut session = app.coach_session();
            if !session.enabled() {
                eprintln!("AI coach is not configured; set CENTURION_AI_API_KEY.");
            }
            if let Some(answer) = session.ask(&question, &stats).await {
                println!("{}", render::coach_message(answer));
            }
        }
        Command::Export { path } => {
            let bytes = progress.export_to(&path).await?;
            println!("Exported {bytes} bytes to {}", path.display());
        }
        Command::Reset { confirmed } => {
            if progress.reset(confirmed).await? {
                println!("All progress deleted.");
            } else {
                println!("Nothing to delete.");
            }
        }
        Command::Theme(action) => {
            let preferences = app.preferences();
            let theme = match action {
                ThemeAction::Show => preferences.theme().await?,
                ThemeAction::Set(theme) => preferences.set_theme(theme).await?,
                ThemeAction::Toggle => preferences.toggle_theme().await?,
            };
            println!("Theme: {theme}");
        }
        Command::Guide(topic) => println!("{}", render::guide(topic)),
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(
        std::env::args().skip(1),
        std::env::var("CENTURION_DB_URL").ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };

    init_logging(args.verbose);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let app = AppServices::new_sqlite(&args.db_url, Clock::default_clock()).await?;

    execute(&app, args.command).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
