/// OpenAPI documentation for DevShare Trending Service
use utoipa::OpenApi;

use crate::models::{
    Author, PopularPost, PopularUser, PostStatus, Tag, TrendingPage, TrendingPost,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevShare Trending Service API",
        version = "1.0.0",
        description = "Read-only rankings for DevShare: the 7-day trending list, the all-time most popular posts and the popular skaters of the last 30 days.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8085", description = "Development server"),
    ),
    paths(
        crate::handlers::trending::get_trending,
        crate::handlers::trending::get_popular_posts,
        crate::handlers::trending::get_popular_skaters,
    ),
    components(schemas(
        TrendingPage,
        TrendingPost,
        PopularPost,
        PopularUser,
        Author,
        Tag,
        PostStatus,
    )),
    tags(
        (name = "trending", description = "Trending and popularity rankings"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}
