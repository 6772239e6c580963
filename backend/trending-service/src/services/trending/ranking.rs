use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::warn;

use super::algorithm::{score_in_window, TrendingWindow};
use crate::models::PostEngagement;

/// A post together with its trend score at `as_of`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub post: PostEngagement,
    pub created_at: DateTime<Utc>,
    pub score: f64,
}

/// Score descending, then post id descending
pub(crate) fn by_score_then_id(a_score: f64, a_id: i64, b_score: f64, b_id: i64) -> Ordering {
    b_score.total_cmp(&a_score).then_with(|| b_id.cmp(&a_id))
}

/// Rank every eligible post inside `window` by trend score.
///
/// Ineligible posts (drafts, missing `created_at`, outside the window) are
/// skipped. A non-finite score is logged and dropped.
pub fn rank_trending(
    posts: Vec<PostEngagement>,
    window: TrendingWindow,
    as_of: DateTime<Utc>,
) -> Vec<ScoredPost> {
    let mut scored: Vec<ScoredPost> = posts
        .into_iter()
        .filter_map(|post| {
            let created_at = post.created_at?;
            let score = score_in_window(&post, window, as_of)?;
            if !score.is_finite() {
                warn!(
                    post_id = post.post_id,
                    score, "Dropping post with non-finite trend score"
                );
                return None;
            }
            Some(ScoredPost {
                post,
                created_at,
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| by_score_then_id(a.score, a.post.post_id, b.score, b.post.post_id));
    scored
}
