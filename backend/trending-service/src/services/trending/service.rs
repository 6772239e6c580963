/// Ranking Service
///
/// Loads engagement from the store, runs the pure rankers and joins author
/// and tag data onto the result. Scores are recomputed on every call.
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use super::aggregator::{aggregate_user_scores, POPULAR_USERS_LIMIT};
use super::algorithm::TrendingWindow;
use super::popular::{rank_popular, POPULAR_POSTS_LIMIT};
use super::ranking::{rank_trending, ScoredPost};
use crate::db::EngagementStore;
use crate::error::{AppError, Result};
use crate::metrics::ranking::{
    record_outcome, POPULAR_POSTS, POPULAR_USERS, RANKING_CANDIDATE_COUNT,
    RANKING_REQUEST_DURATION_SECONDS, TRENDING,
};
use crate::models::{Author, PopularPost, PopularUser, Tag, TrendingPage, TrendingPost};

/// Page-size bounds for the trending list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    pub default_per_page: usize,
    pub max_per_page: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_per_page: 10,
            max_per_page: 50,
        }
    }
}

impl RankingConfig {
    /// Missing means default; anything else is clamped into `1..=max_per_page`.
    pub fn resolve_per_page(&self, requested: Option<usize>) -> usize {
        let max = self.max_per_page.max(1);
        requested
            .unwrap_or(self.default_per_page)
            .clamp(1, max)
    }
}

pub struct RankingService {
    store: Arc<dyn EngagementStore>,
    config: RankingConfig,
}

impl RankingService {
    pub fn new(store: Arc<dyn EngagementStore>, config: RankingConfig) -> Self {
        Self { store, config }
    }

    /// One page (1-based) of the 7-day trending list as of `as_of`
    pub async fn trending_posts(
        &self,
        as_of: DateTime<Utc>,
        page: usize,
        per_page: Option<usize>,
    ) -> Result<TrendingPage> {
        let _timer = RANKING_REQUEST_DURATION_SECONDS
            .with_label_values(&[TRENDING])
            .start_timer();
        let result = self.build_trending_page(as_of, page, per_page).await;
        record_outcome(TRENDING, &result);
        result
    }

    /// Top 5 published posts by likes + saves
    pub async fn popular_posts(&self) -> Result<Vec<PopularPost>> {
        let _timer = RANKING_REQUEST_DURATION_SECONDS
            .with_label_values(&[POPULAR_POSTS])
            .start_timer();
        let result = self.build_popular_posts().await;
        record_outcome(POPULAR_POSTS, &result);
        result
    }

    /// Top 6 authors by summed 30-day trend score
    pub async fn popular_users(&self, as_of: DateTime<Utc>) -> Result<Vec<PopularUser>> {
        let _timer = RANKING_REQUEST_DURATION_SECONDS
            .with_label_values(&[POPULAR_USERS])
            .start_timer();
        let result = self.build_popular_users(as_of).await;
        record_outcome(POPULAR_USERS, &result);
        result
    }

    async fn build_trending_page(
        &self,
        as_of: DateTime<Utc>,
        page: usize,
        per_page: Option<usize>,
    ) -> Result<TrendingPage> {
        if page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }
        let per_page = self.config.resolve_per_page(per_page);
        let window = TrendingWindow::SevenDays;

        let candidates = self.store.engagement_since(window.since(as_of)).await?;
        RANKING_CANDIDATE_COUNT
            .with_label_values(&[TRENDING])
            .observe(candidates.len() as f64);

        let ranked = rank_trending(candidates, window, as_of);
        let total = ranked.len();
        let last_page = total.div_ceil(per_page).max(1);

        let page_items: Vec<ScoredPost> = ranked
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        debug!(
            "Trending page {}/{} ({} of {} posts, window={})",
            page,
            last_page,
            page_items.len(),
            total,
            window
        );

        let data = self.enrich(page_items).await?;

        Ok(TrendingPage {
            data,
            current_page: page,
            per_page,
            total,
            last_page,
            as_of,
        })
    }

    async fn enrich(&self, items: Vec<ScoredPost>) -> Result<Vec<TrendingPost>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<i64> = items
            .iter()
            .map(|s| s.post.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let post_ids: Vec<i64> = items.iter().map(|s| s.post.post_id).collect();

        let authors: HashMap<i64, Author> = self
            .store
            .authors(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in self.store.tags_for_posts(&post_ids).await? {
            tags.entry(row.post_id).or_default().push(row.tag);
        }

        Ok(items
            .into_iter()
            .map(|scored| {
                let post = scored.post;
                TrendingPost {
                    id: post.post_id,
                    user_id: post.author_id,
                    title: post.title,
                    created_at: scored.created_at,
                    likes_count: post.counts.likes,
                    comments_count: post.counts.comments,
                    saves_count: post.counts.saves,
                    trending_score: scored.score,
                    user: authors.get(&post.author_id).cloned(),
                    tags: tags.remove(&post.post_id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn build_popular_posts(&self) -> Result<Vec<PopularPost>> {
        let candidates = self.store.published_engagement().await?;
        RANKING_CANDIDATE_COUNT
            .with_label_values(&[POPULAR_POSTS])
            .observe(candidates.len() as f64);

        Ok(rank_popular(&candidates, POPULAR_POSTS_LIMIT))
    }

    async fn build_popular_users(&self, as_of: DateTime<Utc>) -> Result<Vec<PopularUser>> {
        let window = TrendingWindow::ThirtyDays;
        let candidates = self.store.engagement_since(window.since(as_of)).await?;
        RANKING_CANDIDATE_COUNT
            .with_label_values(&[POPULAR_USERS])
            .observe(candidates.len() as f64);

        // Rank every positive total so an author without a user row never takes a slot
        let scores = aggregate_user_scores(&candidates, as_of, usize::MAX);
        if scores.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = scores.iter().map(|s| s.user_id).collect();
        let mut authors: HashMap<i64, Author> = self
            .store
            .authors(&ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(scores
            .into_iter()
            .filter_map(|score| match authors.remove(&score.user_id) {
                Some(author) => Some(PopularUser {
                    id: author.id,
                    name: author.name,
                    username: author.username,
                    total_trending_score: score.total_score,
                }),
                None => {
                    warn!("Popular user {} has no user row", score.user_id);
                    None
                }
            })
            .take(POPULAR_USERS_LIMIT)
            .collect())
    }
}
