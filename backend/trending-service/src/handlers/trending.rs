/// Ranking API Handlers
///
/// Read-only endpoints over `RankingService`. Each request ranks against
/// the wall clock at the moment it arrives.
use actix_web::{error::QueryPayloadError, get, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::IntoParams;

use crate::error::{AppError, Result};
use crate::models::{PopularPost, PopularUser, TrendingPage};
use crate::services::RankingService;

/// Shared state for the ranking handlers
pub struct RankingHandlerState {
    pub ranking: Arc<RankingService>,
}

/// Query parameters for GET /api/v1/trending
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendingQuery {
    /// 1-based page number (default: 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Page size (default: 10, max: 50)
    pub per_page: Option<usize>,
}

fn default_page() -> usize {
    1
}

/// GET /api/v1/trending
///
/// Published posts from the last 7 days ordered by trend score
#[utoipa::path(
    get,
    path = "/api/v1/trending",
    tag = "trending",
    params(TrendingQuery),
    responses(
        (status = 200, description = "One page of trending posts", body = TrendingPage),
        (status = 400, description = "Invalid page number"),
        (status = 500, description = "Storage failure")
    )
)]
#[get("/api/v1/trending")]
pub async fn get_trending(
    query: web::Query<TrendingQuery>,
    state: web::Data<RankingHandlerState>,
) -> Result<HttpResponse> {
    debug!(
        "Trending request: page={}, per_page={:?}",
        query.page, query.per_page
    );

    let page = state
        .ranking
        .trending_posts(Utc::now(), query.page, query.per_page)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/posts/popular
///
/// Top 5 published posts by likes plus saves
#[utoipa::path(
    get,
    path = "/api/v1/posts/popular",
    tag = "trending",
    responses(
        (status = 200, description = "Most popular posts", body = [PopularPost]),
        (status = 500, description = "Storage failure")
    )
)]
#[get("/api/v1/posts/popular")]
pub async fn get_popular_posts(state: web::Data<RankingHandlerState>) -> Result<HttpResponse> {
    let posts = state.ranking.popular_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/v1/popular-skaters
///
/// Top 6 authors by summed 30-day trend score
#[utoipa::path(
    get,
    path = "/api/v1/popular-skaters",
    tag = "trending",
    responses(
        (status = 200, description = "Popular skaters", body = [PopularUser]),
        (status = 500, description = "Storage failure")
    )
)]
#[get("/api/v1/popular-skaters")]
pub async fn get_popular_skaters(state: web::Data<RankingHandlerState>) -> Result<HttpResponse> {
    let users = state.ranking.popular_users(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Query string rejections surface as `AppError::BadRequest` JSON
fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Register the ranking endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(get_trending)
        .service(get_popular_posts)
        .service(get_popular_skaters);
}
