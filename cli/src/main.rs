mod render;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, Utc};
use clap::{ArgAction, Parser, Subcommand};
use foodlog_core::config::validate_goal;
use foodlog_core::content::{load_places, load_workouts};
use foodlog_core::{
    parse_day, parse_food_input, parse_local_timestamp, Config, DayKey, FileKeyValueStore,
    FoodLogService, FoodLogStore, FoodRecord, IntakeSummary, KeyValueStore,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foodlog")]
#[command(about = "Daily calorie log", long_about = None)]
struct Cli {
    /// Directory holding the stored food logs (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Daily calorie goal (overrides the config file)
    #[arg(long, global = true)]
    goal: Option<f64>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log something you ate (usage: add "Apple" 95)
    Add {
        name: String,
        calories: String,
        /// When it was eaten, local "YYYY-MM-DD HH:MM" (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// List the food logged on a day (default: today)
    List {
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
    },
    /// Show the calorie total and progress for a day (default: today)
    Total {
        #[arg(long, default_value = "today", allow_hyphen_values = true)]
        date: String,
    },
    /// Every day with logged food
    Days,
    /// Show workout programs grouped by muscle group
    Workouts {
        /// workouts.json (default: from config)
        file: Option<PathBuf>,
    },
    /// Show sports places
    Places {
        /// places.json (default: from config)
        file: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(goal) = cli.goal {
        validate_goal(goal)?;
        config.daily_goal = goal;
    }
    Ok(config)
}

/// Logs one food entry and returns the lines to report. Nothing is reported
/// unless the save succeeded.
fn add_food<S: KeyValueStore>(
    service: &FoodLogService<S>,
    name: &str,
    calories: &str,
    at: Option<&str>,
) -> Result<Vec<String>> {
    let (name, calories) = parse_food_input(name, calories)?;
    let timestamp = match at {
        Some(at) => parse_local_timestamp(at)?,
        None => Utc::now(),
    };
    let day = DayKey::local(&timestamp);
    let record = FoodRecord::new(name, calories, timestamp);
    let added = format!("Added: {} ({:.0} kcal) on {}", record.name, record.calories, day);
    let summary = service.log_food(day, record)?;
    Ok(vec![added, render::progress_line(&summary)])
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    debug!(data_dir = %config.data_dir.display(), goal = config.daily_goal, "configuration loaded");

    let kv = FileKeyValueStore::new(Some(config.data_dir.clone()))?;
    let service = FoodLogService::new(FoodLogStore::new(kv), config.daily_goal);

    match cli.command {
        Some(Commands::Add { name, calories, at }) => {
            for line in add_food(&service, &name, &calories, at.as_deref())? {
                println!("{}", line);
            }
        }
        Some(Commands::List { date }) => {
            let day = parse_day(&date, today())?;
            let log = service.get_log(day)?;
            let summary = IntakeSummary::new(&log.items, service.goal());
            render::show_day(day, &log.items, &summary);
        }
        Some(Commands::Total { date }) => {
            let day = parse_day(&date, today())?;
            let summary = service.intake(day)?;
            println!("{}: {}", day, render::progress_line(&summary));
            if summary.is_over_goal() {
                println!("Over goal by {:.0} kcal", summary.total - summary.goal);
            } else {
                println!("{:.0} kcal left", summary.remaining);
            }
        }
        Some(Commands::Days) => {
            let history = service.history()?;
            render::show_history(&history);
        }
        Some(Commands::Workouts { file }) => {
            let path = file
                .or(config.workouts_file)
                .ok_or_else(|| anyhow!("No workouts file given or configured"))?;
            let workouts = load_workouts(&path)
                .with_context(|| format!("Could not load workouts from {}", path.display()))?;
            render::show_workouts(&workouts);
        }
        Some(Commands::Places { file }) => {
            let path = file
                .or(config.places_file)
                .ok_or_else(|| anyhow!("No places file given or configured"))?;
            let places = load_places(&path)
                .with_context(|| format!("Could not load places from {}", path.display()))?;
            render::show_places(&places);
        }
        None => {
            let day = DayKey::new(today());
            let log = service.get_log(day)?;
            let summary = IntakeSummary::new(&log.items, service.goal());
            render::show_day(day, &log.items, &summary);
        }
    }
    Ok(())
}
