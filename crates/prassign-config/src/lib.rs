//! Config module.

mod drivers;

use std::{
    env,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

pub use drivers::{DatabaseDriver, DriverError};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Postgres options.
    pub pg: DatabasePgConfig,
}

#[derive(Debug, Clone)]
pub struct DatabasePgConfig {
    /// Database URL.
    pub url: String,
    /// Database pool size.
    pub pool_size: u32,
    /// Database connection timeout (in seconds)
    pub connection_timeout: u32,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct ReviewersConfig {
    /// Maximum reviewers picked when a pull request is created.
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct DeactivationConfig {
    /// Deadline for a team deactivation (in milliseconds).
    pub timeout_ms: u64,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database options.
    pub database: DatabaseConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Reviewer selection options.
    pub reviewers: ReviewersConfig,
    /// Team deactivation options.
    pub deactivation: DeactivationConfig,
    /// Random seed
    pub random_seed: u64,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    ///
    /// An unknown database driver falls back to `pg`.
    pub fn from_env(version: String) -> Config {
        Config {
            database: DatabaseConfig {
                driver: DatabaseDriver::from_str(&env_to_str("PRASSIGN_DATABASE_DRIVER", "pg"))
                    .unwrap_or(DatabaseDriver::Postgres),
                pg: DatabasePgConfig {
                    url: env_to_str("PRASSIGN_DATABASE_PG_URL", ""),
                    pool_size: env_to_u32("PRASSIGN_DATABASE_PG_POOL_SIZE", 20),
                    connection_timeout: env_to_u32("PRASSIGN_DATABASE_PG_CONNECTION_TIMEOUT", 5),
                },
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("PRASSIGN_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("PRASSIGN_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("PRASSIGN_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("PRASSIGN_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("PRASSIGN_SERVER_BIND_PORT", 8080),
                workers_count: env_to_optional_u16("PRASSIGN_SERVER_WORKERS_COUNT", None),
            },
            reviewers: ReviewersConfig {
                count: env_to_u64("PRASSIGN_REVIEWERS_COUNT", 2) as usize,
            },
            deactivation: DeactivationConfig {
                timeout_ms: env_to_u64("PRASSIGN_DEACTIVATION_TIMEOUT_MS", 100),
            },
            random_seed: env_to_u64("PRASSIGN_RANDOM_SEED", random_seed()),
            version,
        }
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
