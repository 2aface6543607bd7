use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_DAILY_GOAL: f64 = 2500.0;
const APP_DIR_NAME: &str = ".foodlog";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding one file per stored day.
    pub data_dir: PathBuf,
    /// Calorie goal the daily progress is measured against.
    pub daily_goal: f64,
    pub workouts_file: Option<PathBuf>,
    pub places_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    daily_goal: Option<f64>,
    workouts_file: Option<PathBuf>,
    places_file: Option<PathBuf>,
}

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(APP_DIR_NAME))
}

/// `<config dir>/foodlog/config.toml`, e.g. `~/.config/foodlog/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("foodlog").join(CONFIG_FILE_NAME))
}

impl Config {
    /// Loads the default config file if it exists, otherwise defaults.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Self::from_file_config(FileConfig::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file_config: FileConfig = toml::from_str(content)?;
        Self::from_file_config(file_config)
    }

    fn from_file_config(file_config: FileConfig) -> Result<Self> {
        let daily_goal = file_config.daily_goal.unwrap_or(DEFAULT_DAILY_GOAL);
        validate_goal(daily_goal)?;

        let data_dir = match file_config.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            daily_goal,
            workouts_file: file_config.workouts_file,
            places_file: file_config.places_file,
        })
    }
}

pub fn validate_goal(goal: f64) -> Result<()> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(anyhow!("Daily goal must be a positive number, got {}", goal));
    }
    Ok(())
}
