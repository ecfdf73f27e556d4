//! Log configuration.

use std::str::FromStr;

use prassign_config::Config;
use prassign_sentry::sentry;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,sqlx=error,prassign=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Could not set tracing global default subscriber,\n  caused by: {}",
        source
    )]
    TracingSetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize tracing log tracer,\n  caused by: {}", source)]
    TracingLogTracerError {
        source: tracing::log::SetLoggerError,
    },
    #[error(
        "Wrong env filter configuration: {}\n  caused by: {}",
        configuration,
        source
    )]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

fn build_env_filter(log_config: String) -> Result<EnvFilter, LoggingError> {
    EnvFilter::from_str(&log_config).map_err(|e| LoggingError::EnvFilterConfigurationError {
        source: e,
        configuration: log_config,
    })
}

/// Configure logging.
///
/// Bunyan JSON output replaces the tree output when enabled. Events are
/// forwarded to Sentry when a Sentry URL is configured.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::TracingLogTracerError { source: e })?;

    let log_config = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_ENV_CONFIG.to_string());
    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let use_bunyan = config.logging.use_bunyan;

    let filter_layer = build_env_filter(log_config)?;
    let hierarchical_layer = (!use_bunyan).then(|| {
        HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true)
    });
    let error_layer = ErrorLayer::default();
    let json_storage_layer = use_bunyan.then_some(JsonStorageLayer);
    let bunyan_layer = use_bunyan.then(|| BunyanFormattingLayer::new(app_name, std::io::stdout));
    let sentry_layer =
        (!config.sentry.url.is_empty()).then(sentry::integrations::tracing::layer);

    let subscriber = tracing_subscriber::registry()
        .with(error_layer)
        .with(hierarchical_layer)
        .with(filter_layer)
        .with(json_storage_layer)
        .with(bunyan_layer)
        .with(sentry_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        assert!(build_env_filter(DEFAULT_ENV_CONFIG.into()).is_ok());
    }

    #[test]
    fn invalid_filter() {
        match build_env_filter("prassign=loud".into()) {
            Err(LoggingError::EnvFilterConfigurationError { configuration, .. }) => {
                assert_eq!(configuration, "prassign=loud")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
