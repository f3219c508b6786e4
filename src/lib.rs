pub mod analytics;
pub mod commands;
pub mod dates;
pub mod models;
pub mod score;
pub mod storage;
pub mod store;
pub mod streak;
pub mod tui;
