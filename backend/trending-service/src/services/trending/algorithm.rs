//! Gravity-decay trend score shared by the trending list and the
//! popular-skaters aggregation.
//!
//! ```text
//! weighted = likes * 1 + comments * 2 + saves * 3 - 1
//! score    = weighted / (age_hours + 2) ^ GRAVITY
//! ```

use chrono::{DateTime, Duration, Utc};

use crate::models::{InteractionCounts, PostEngagement};

/// Exponent controlling how fast a score decays with age
pub const GRAVITY: f64 = 1.8;

/// Added to the age so brand-new posts never divide by zero
pub const AGE_OFFSET_HOURS: f64 = 2.0;

/// Subtracted from every weighted sum; unengaged posts score below zero
pub const INTERACTION_PENALTY: f64 = 1.0;

pub const LIKE_WEIGHT: f64 = 1.0;
pub const COMMENT_WEIGHT: f64 = 2.0;
pub const SAVE_WEIGHT: f64 = 3.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Trailing eligibility window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingWindow {
    /// Post-level trending list
    SevenDays,
    /// User-level popular-skaters aggregation
    ThirtyDays,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }

    /// Earliest creation time still inside the window
    pub fn since(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        as_of - Duration::days(self.days())
    }

    pub fn contains(&self, created_at: DateTime<Utc>, as_of: DateTime<Utc>) -> bool {
        created_at >= self.since(as_of)
    }
}

impl std::fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn weighted_interactions(counts: &InteractionCounts) -> f64 {
    counts.likes as f64 * LIKE_WEIGHT
        + counts.comments as f64 * COMMENT_WEIGHT
        + counts.saves as f64 * SAVE_WEIGHT
        - INTERACTION_PENALTY
}

/// Fractional hours between `created_at` and `as_of`, clamped at zero for
/// posts stamped in the future by clock skew.
pub fn age_hours(created_at: DateTime<Utc>, as_of: DateTime<Utc>) -> f64 {
    let millis = (as_of - created_at).num_milliseconds() as f64;
    (millis / MILLIS_PER_HOUR).max(0.0)
}

/// Decayed score for the given counts at the given age
pub fn trend_score(counts: &InteractionCounts, age_hours: f64) -> f64 {
    let base = age_hours.max(0.0) + AGE_OFFSET_HOURS;
    weighted_interactions(counts) / base.powf(GRAVITY)
}

/// Score a stored post, or `None` when it is not eligible for ranking
/// (draft, or missing a creation timestamp).
pub fn score_post(post: &PostEngagement, as_of: DateTime<Utc>) -> Option<f64> {
    if !post.is_published() {
        return None;
    }
    let created_at = post.created_at?;
    Some(trend_score(&post.counts, age_hours(created_at, as_of)))
}

/// Score a post only if it also falls inside `window`
pub fn score_in_window(
    post: &PostEngagement,
    window: TrendingWindow,
    as_of: DateTime<Utc>,
) -> Option<f64> {
    let created_at = post.created_at?;
    if !window.contains(created_at, as_of) {
        return None;
    }
    score_post(post, as_of)
}
