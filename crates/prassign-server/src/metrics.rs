use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref PULL_REQUESTS_CREATED: IntCounter =
        IntCounter::new("pull_requests_created", "Pull requests created")
            .expect("valid metric definition");
    pub static ref PULL_REQUESTS_MERGED: IntCounter =
        IntCounter::new("pull_requests_merged", "Merge requests handled")
            .expect("valid metric definition");
    pub static ref REVIEWERS_REASSIGNED: IntCounter =
        IntCounter::new("reviewers_reassigned", "Reviewers reassigned")
            .expect("valid metric definition");
    pub static ref TEAMS_DEACTIVATED: IntCounter =
        IntCounter::new("teams_deactivated", "Team deactivations")
            .expect("valid metric definition");
}

fn metrics_error<E: std::fmt::Display>(e: E) -> ServerError {
    ServerError::MetricsError {
        message: e.to_string(),
    }
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(metrics_error)?;

    setup_process_metrics(&prometheus)?;

    for counter in [
        &*PULL_REQUESTS_CREATED,
        &*PULL_REQUESTS_MERGED,
        &*REVIEWERS_REASSIGNED,
        &*TEAMS_DEACTIVATED,
    ] {
        prometheus
            .registry
            .register(Box::new(counter.clone()))
            .map_err(metrics_error)?;
    }

    Ok(prometheus)
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(metrics_error)
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::warn!("Process metrics are only supported on Unix.");
    Ok(())
}
