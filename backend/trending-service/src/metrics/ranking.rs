use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Time spent producing one ranking (trending, popular_posts, popular_users).
    pub static ref RANKING_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "ranking_request_duration_seconds",
        "Ranking computation duration segmented by ranking",
        &["ranking"]
    )
    .expect("failed to register ranking_request_duration_seconds");

    /// Rankings served, by outcome (ok/error).
    pub static ref RANKING_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "ranking_request_total",
        "Total ranking requests segmented by ranking and outcome",
        &["ranking", "outcome"]
    )
    .expect("failed to register ranking_request_total");

    /// Posts read from storage before filtering and sorting.
    pub static ref RANKING_CANDIDATE_COUNT: HistogramVec = register_histogram_vec!(
        "ranking_candidate_count",
        "Number of candidate posts evaluated segmented by ranking",
        &["ranking"],
        vec![0.0, 10.0, 50.0, 100.0, 500.0, 1_000.0, 5_000.0, 10_000.0]
    )
    .expect("failed to register ranking_candidate_count");
}

/// Label values shared by the ranking collectors
pub const TRENDING: &str = "trending";
pub const POPULAR_POSTS: &str = "popular_posts";
pub const POPULAR_USERS: &str = "popular_users";

pub fn record_outcome<T, E>(ranking: &str, result: &Result<T, E>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    RANKING_REQUEST_TOTAL
        .with_label_values(&[ranking, outcome])
        .inc();
}
