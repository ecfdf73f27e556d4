//! Validation utilities.

use std::fmt::Write;

use prassign_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        let _ = write!(error, "\n  - Missing env. var.: {}", name);
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        let _ = write!(error, "\n  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_PORT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "PRASSIGN_DATABASE_PG_URL");
    }

    if config.reviewers.count == 0 {
        _invalid(&mut error, "PRASSIGN_REVIEWERS_COUNT", "must be at least 1");
    }
    if config.deactivation.timeout_ms == 0 {
        _invalid(
            &mut error,
            "PRASSIGN_DEACTIVATION_TIMEOUT_MS",
            "must be at least 1",
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
