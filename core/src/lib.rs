pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use error::{ContentError, InputError, StoreError};
pub use input::parse_food_input;
pub use model::daily_log::DailyLog;
pub use model::food_record::FoodRecord;
pub use repository::{storage_key, FileKeyValueStore, FoodLogStore, KeyValueStore, MemoryKeyValueStore};
pub use service::food_log_service::FoodLogService;
pub use service::intake::{progress_ratio, total, IntakeSummary};
pub use time::{parse_day, parse_local_timestamp, DayKey};
