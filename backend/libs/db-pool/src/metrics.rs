//! Pool gauges, acquire latency and acquire failures, labelled by service

use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use std::time::Instant;

lazy_static::lazy_static! {
    static ref DB_POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Connections held by the pool, by state (idle/active/max)",
        &["service", "state"]
    ).expect("failed to register db_pool_connections");

    static ref DB_POOL_ACQUIRE_DURATION: HistogramVec = register_histogram_vec!(
        "db_pool_acquire_duration_seconds",
        "Time spent waiting for a pooled connection",
        &["service"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).expect("failed to register db_pool_acquire_duration_seconds");

    static ref DB_POOL_ACQUIRE_ERRORS: IntCounterVec = register_int_counter_vec!(
        "db_pool_acquire_errors_total",
        "Failed connection acquisitions, by reason",
        &["service", "reason"]
    ).expect("failed to register db_pool_acquire_errors_total");
}

/// Refresh the idle/active/max gauges from the pool's current state
pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) {
    let size = pool.size() as i64;
    let idle = pool.num_idle() as i64;

    for (state, value) in [
        ("idle", idle),
        ("active", size - idle),
        ("max", pool.options().get_max_connections() as i64),
    ] {
        DB_POOL_CONNECTIONS
            .with_label_values(&[service, state])
            .set(value);
    }
}

fn acquire_error_reason(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::PoolTimedOut => "timeout",
        sqlx::Error::PoolClosed => "closed",
        _ => "other",
    }
}

/// `pool.acquire()` that also records wait time and failures for `service`.
pub async fn acquire_with_metrics(
    pool: &PgPool,
    service: &str,
) -> Result<PoolConnection<Postgres>, sqlx::Error> {
    let start = Instant::now();
    let result = pool.acquire().await;

    DB_POOL_ACQUIRE_DURATION
        .with_label_values(&[service])
        .observe(start.elapsed().as_secs_f64());

    if let Err(err) = &result {
        DB_POOL_ACQUIRE_ERRORS
            .with_label_values(&[service, acquire_error_reason(err)])
            .inc();
    }

    result
}
