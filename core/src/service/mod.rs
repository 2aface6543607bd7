pub mod food_log_service;
pub mod intake;
