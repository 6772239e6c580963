/// Trending Service Library
///
/// Ranking engine for DevShare:
/// - Gravity-decay trend score over likes, comments and saves
/// - 7-day trending list with pagination and author/tag enrichment
/// - 30-day popular skaters and all-time popular posts
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
