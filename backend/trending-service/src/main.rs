use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool, DbConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use trending_service::db::PgEngagementRepo;
use trending_service::handlers::{self, HealthState, RankingHandlerState};
use trending_service::openapi::ApiDoc;
use trending_service::services::{RankingConfig, RankingService};
use trending_service::Config;

const SERVICE_NAME: &str = "trending-service";

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Trending Service
///
/// Read-only ranking API for DevShare.
///
/// # Routes
///
/// - `/api/v1/trending` - 7-day trending posts, paginated
/// - `/api/v1/posts/popular` - all-time top posts by likes + saves
/// - `/api/v1/popular-skaters` - top authors of the last 30 days
/// - `/api/v1/health`, `/api/v1/health/live`, `/metrics`
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let mut db_cfg = DbConfig::for_service(SERVICE_NAME);
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_pool::parse_env_optional::<u32>("DB_MAX_CONNECTIONS").is_none() {
        db_cfg.max_connections = config.database.max_connections;
    }
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;
    tracing::info!("Connected to database");

    let store = Arc::new(PgEngagementRepo::new(db_pool.clone()));
    let ranking = Arc::new(RankingService::new(
        store,
        RankingConfig::from(&config.trending),
    ));

    let ranking_state = web::Data::new(RankingHandlerState { ranking });
    let health_state = web::Data::new(HealthState::new(db_pool));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let cors_origins = config.cors_origins();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in &cors_origins {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allowed_methods(vec!["GET"]).allow_any_header().max_age(3600);

        App::new()
            .app_data(ranking_state.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url(ApiDoc::openapi_json_path(), ApiDoc::openapi()),
            )
            .route(
                "/metrics",
                web::get().to(trending_service::metrics::serve_metrics),
            )
            .route("/api/v1/health", web::get().to(handlers::health_summary))
            .route("/api/v1/health/live", web::get().to(handlers::liveness_check))
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            result
                .context("HTTP server task panicked")?
                .context("HTTP server error")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, stopping HTTP server");
            server_handle.stop(true).await;
            server_task
                .await
                .context("HTTP server task panicked")?
                .context("HTTP server error")?;
        }
    }

    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}
