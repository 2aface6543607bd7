pub mod daily_log;
pub mod food_record;
pub mod place;
pub mod workout;
