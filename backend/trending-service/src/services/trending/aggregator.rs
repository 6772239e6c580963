//! "Popular skaters": authors ranked by the summed trend score of their
//! posts from the last 30 days.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use super::algorithm::{score_in_window, TrendingWindow};
use super::ranking::by_score_then_id;
use crate::models::PostEngagement;

pub const POPULAR_USERS_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserScore {
    pub user_id: i64,
    pub total_score: f64,
}

/// Sum per-post trend scores by author and keep the top `limit` authors with
/// a strictly positive total.
///
/// Each post id contributes once, even if the input repeats it.
pub fn aggregate_user_scores(
    posts: &[PostEngagement],
    as_of: DateTime<Utc>,
    limit: usize,
) -> Vec<UserScore> {
    let mut seen = HashSet::with_capacity(posts.len());
    let mut totals: HashMap<i64, f64> = HashMap::new();

    for post in posts {
        if !seen.insert(post.post_id) {
            continue;
        }
        let Some(score) = score_in_window(post, TrendingWindow::ThirtyDays, as_of) else {
            continue;
        };
        if !score.is_finite() {
            continue;
        }
        *totals.entry(post.author_id).or_insert(0.0) += score;
    }

    let mut ranked: Vec<UserScore> = totals
        .into_iter()
        .filter(|(_, total)| *total > 0.0)
        .map(|(user_id, total_score)| UserScore {
            user_id,
            total_score,
        })
        .collect();

    ranked.sort_by(|a, b| by_score_then_id(a.total_score, a.user_id, b.total_score, b.user_id));
    ranked.truncate(limit);
    ranked
}
