use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trending_service::models::{InteractionCounts, PostEngagement, PostStatus};
use trending_service::services::trending::aggregator::{aggregate_user_scores, POPULAR_USERS_LIMIT};
use trending_service::services::trending::popular::{rank_popular, POPULAR_POSTS_LIMIT};
use trending_service::services::trending::ranking::rank_trending;
use trending_service::services::trending::{trend_score, TrendingWindow};

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Deterministic spread of ages (0-30 days), authors and counts
fn candidates(count: usize) -> Vec<PostEngagement> {
    (0..count)
        .map(|i| {
            let i = i as i64;
            PostEngagement {
                post_id: i + 1,
                author_id: i % 97,
                title: format!("post {}", i),
                status: if i % 11 == 0 {
                    PostStatus::Draft
                } else {
                    PostStatus::Published
                },
                created_at: Some(as_of() - Duration::minutes((i * 37) % (30 * 24 * 60))),
                counts: InteractionCounts::new((i % 50) as u64, (i % 7) as u64, (i % 5) as u64),
            }
        })
        .collect()
}

fn bench_trend_score(c: &mut Criterion) {
    let counts = InteractionCounts::new(10, 5, 2);
    c.bench_function("trend_score", |b| {
        b.iter(|| trend_score(black_box(&counts), black_box(17.25)))
    });
}

fn bench_rank_trending(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_trending");

    for candidate_count in [100, 1000, 10000].iter() {
        let posts = candidates(*candidate_count);
        group.bench_with_input(
            format!("{}_candidates", candidate_count),
            &posts,
            |b, posts| {
                b.iter(|| rank_trending(posts.clone(), TrendingWindow::SevenDays, as_of()));
            },
        );
    }

    group.finish();
}

fn bench_popular(c: &mut Criterion) {
    let mut group = c.benchmark_group("popular");
    let posts = candidates(10_000);

    group.bench_function("aggregate_user_scores_10000", |b| {
        b.iter(|| aggregate_user_scores(black_box(&posts), as_of(), POPULAR_USERS_LIMIT))
    });
    group.bench_function("rank_popular_10000", |b| {
        b.iter(|| rank_popular(black_box(&posts), POPULAR_POSTS_LIMIT))
    });

    group.finish();
}

criterion_group!(benches, bench_trend_score, bench_rank_trending, bench_popular);
criterion_main!(benches);
