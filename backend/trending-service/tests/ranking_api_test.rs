//! Integration Tests: Ranking API
//!
//! Drives the three ranking endpoints through actix with an in-memory store.
//!
//! Coverage:
//! - Trending ordering, pagination envelope and enrichment
//! - Drafts never appear in any list
//! - Popular posts ignore comments and cap at 5
//! - Popular skaters cap at 6 and exclude non-positive totals
//! - Storage failures surface as 500
//! - Malformed query strings get the JSON 400 body

mod common;

use actix_web::{http::StatusCode, test, web, App};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;

use common::{draft, published, InMemoryStore};
use trending_service::handlers::{self, RankingHandlerState};
use trending_service::services::{RankingConfig, RankingService};

macro_rules! init_app {
    ($store:expr) => {{
        let ranking = Arc::new(RankingService::new(
            Arc::new($store),
            RankingConfig::default(),
        ));
        test::init_service(
            App::new()
                .app_data(web::Data::new(RankingHandlerState { ranking }))
                .configure(handlers::configure),
        )
        .await
    }};
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_trending_orders_by_decayed_score() {
    let store = InMemoryStore::new()
        .with_author(1, "ana")
        .with_author(2, "bo")
        // 50 likes two days ago vs. a fresh post with mixed engagement
        .with_post(published(10, 1, Duration::hours(48), 50, 0, 0))
        .with_post(published(11, 2, Duration::minutes(1), 10, 5, 2))
        .with_post(draft(12, 2, 1_000, 1_000, 1_000))
        .with_post(published(13, 1, Duration::days(8), 1_000, 0, 0))
        .with_tag(11, 3, "street");
    let app = init_app!(store);

    let req = test::TestRequest::get().uri("/api/v1/trending").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body["data"]), vec![11, 10]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["last_page"], 1);
    assert!(body["as_of"].is_string());

    let top = &body["data"][0];
    assert_eq!(top["user"]["username"], "bo");
    assert_eq!(top["tags"][0]["name"], "street");
    assert_eq!(top["likes_count"], 10);
    assert_eq!(top["comments_count"], 5);
    assert_eq!(top["saves_count"], 2);
    let score = top["trending_score"].as_f64().unwrap_or_default();
    assert!(score > 6.5 && score < 7.2, "unexpected score {}", score);
}

#[actix_web::test]
async fn test_trending_pagination() {
    let mut store = InMemoryStore::new().with_author(1, "ana");
    for id in 1..=12 {
        store = store.with_post(published(id, 1, Duration::hours(id), 5, 0, 0));
    }
    let app = init_app!(store);

    let req = test::TestRequest::get()
        .uri("/api/v1/trending?page=3&per_page=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body["data"]), vec![11, 12]);
    assert_eq!(body["last_page"], 3);
    assert_eq!(body["total"], 12);

    let req = test::TestRequest::get()
        .uri("/api/v1/trending?page=9&per_page=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["current_page"], 9);

    let req = test::TestRequest::get()
        .uri("/api/v1/trending?per_page=500")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["per_page"], 50);
}

#[actix_web::test]
async fn test_trending_rejects_page_zero() {
    let app = init_app!(InMemoryStore::new());

    let req = test::TestRequest::get()
        .uri("/api/v1/trending?page=0")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Bad request")));
}

#[actix_web::test]
async fn test_trending_rejects_non_numeric_query_as_json() {
    let app = init_app!(InMemoryStore::new());

    for uri in [
        "/api/v1/trending?page=abc",
        "/api/v1/trending?per_page=-3",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400, "{}", uri);
        assert!(
            body["error"]
                .as_str()
                .is_some_and(|e| e.starts_with("Bad request:")),
            "{}",
            uri
        );
    }
}

#[actix_web::test]
async fn test_popular_posts_ignore_comments_and_drafts() {
    let mut store = InMemoryStore::new()
        .with_post(draft(100, 1, 9_999, 0, 9_999))
        // Heavily commented but few likes and saves
        .with_post(published(1, 1, Duration::days(400), 1, 10_000, 0));
    for id in 2..=7 {
        store = store.with_post(published(id, 1, Duration::days(90), id as u64, 0, 1));
    }
    let app = init_app!(store);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts/popular")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![7, 6, 5, 4, 3]);
    assert_eq!(body[0]["likes_count"], 7);
    assert_eq!(body[0]["saves_count"], 1);
    assert!(body[0].get("comments_count").is_none());
}

#[actix_web::test]
async fn test_popular_skaters_sum_positive_totals() {
    let mut store = InMemoryStore::new();
    for user in 1..=8 {
        store = store
            .with_author(user, &format!("skater{}", user))
            .with_post(published(user, user, Duration::days(2), user as u64 * 3, 0, 0));
    }
    // Net positive: one strong post plus an unengaged one
    store = store
        .with_author(20, "mixed")
        .with_post(published(200, 20, Duration::hours(1), 40, 0, 0))
        .with_post(published(201, 20, Duration::hours(1), 0, 0, 0))
        // Only unengaged posts: negative total
        .with_author(30, "quiet")
        .with_post(published(300, 30, Duration::hours(1), 0, 0, 0))
        // Outside 30 days
        .with_author(40, "veteran")
        .with_post(published(400, 40, Duration::days(31), 10_000, 0, 0));
    let app = init_app!(store);

    let req = test::TestRequest::get()
        .uri("/api/v1/popular-skaters")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let users = ids(&body);
    assert_eq!(users.len(), 6);
    assert_eq!(users[0], 20);
    assert!(!users.contains(&30));
    assert!(!users.contains(&40));
    for user in body.as_array().into_iter().flatten() {
        assert!(user["total_trending_score"].as_f64().unwrap_or_default() > 0.0);
        assert!(user["username"].is_string());
    }
}

#[actix_web::test]
async fn test_storage_failure_returns_500() {
    let app = init_app!(InMemoryStore::new().failing("connection refused"));

    for uri in [
        "/api/v1/trending",
        "/api/v1/posts/popular",
        "/api/v1/popular-skaters",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
    }
}

#[actix_web::test]
async fn test_empty_store_returns_empty_lists() {
    let app = init_app!(InMemoryStore::new());

    let req = test::TestRequest::get().uri("/api/v1/trending").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["last_page"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/popular-skaters")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, serde_json::json!([]));
}
