//! All-time "most popular" list: likes plus saves, no time decay.

use std::cmp::Ordering;

use crate::models::{InteractionCounts, PopularPost, PostEngagement};

pub const POPULAR_POSTS_LIMIT: usize = 5;

/// Comments do not contribute.
pub fn popularity_key(counts: &InteractionCounts) -> u64 {
    counts.likes.saturating_add(counts.saves)
}

fn by_key_then_id(a: &PostEngagement, b: &PostEngagement) -> Ordering {
    popularity_key(&b.counts)
        .cmp(&popularity_key(&a.counts))
        .then_with(|| b.post_id.cmp(&a.post_id))
}

/// Top `limit` published posts by likes + saves
pub fn rank_popular(posts: &[PostEngagement], limit: usize) -> Vec<PopularPost> {
    let mut published: Vec<&PostEngagement> = posts.iter().filter(|p| p.is_published()).collect();
    published.sort_by(|a, b| by_key_then_id(a, b));

    published
        .into_iter()
        .take(limit)
        .map(|p| PopularPost {
            id: p.post_id,
            title: p.title.clone(),
            likes_count: p.counts.likes,
            saves_count: p.counts.saves,
        })
        .collect()
}
