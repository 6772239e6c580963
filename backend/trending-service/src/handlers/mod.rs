/// HTTP handlers for trending-service
///
/// - Rankings: trending posts, popular posts, popular skaters
/// - Health: database-backed health summary and liveness
pub mod health;
pub mod trending;

pub use health::{health_summary, liveness_check, HealthState};
pub use trending::{
    configure, get_popular_posts, get_popular_skaters, get_trending, RankingHandlerState,
};
