//! Trending and popularity rankings
//!
//! - `algorithm`: the gravity-decay trend score and trailing windows
//! - `ranking`: 7-day post ordering
//! - `aggregator`: 30-day per-author totals
//! - `popular`: all-time likes + saves list
//! - `service`: storage, pagination and enrichment around the above

pub mod aggregator;
pub mod algorithm;
pub mod popular;
pub mod ranking;
pub mod service;

pub use algorithm::{trend_score, TrendingWindow};
pub use service::{RankingConfig, RankingService};
