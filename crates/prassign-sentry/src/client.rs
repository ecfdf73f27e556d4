use std::{future::Future, str::FromStr};

use prassign_config::Config;
use sentry::{
    integrations::debug_images::DebugImagesIntegration, types::Dsn, ClientInitGuard,
    ClientOptions,
};
use tracing::{info, warn};

fn init_client(config: &Config) -> Option<ClientInitGuard> {
    if config.sentry.url.is_empty() {
        return None;
    }

    let dsn = match Dsn::from_str(&config.sentry.url) {
        Ok(dsn) => dsn,
        Err(e) => {
            warn!(error = %e, message = "Invalid Sentry URL, integration disabled");
            return None;
        }
    };

    info!("Sentry integration enabled.");

    // Enable backtraces
    std::env::set_var("RUST_BACKTRACE", "1");

    let mut options = ClientOptions::new().add_integration(DebugImagesIntegration::default());
    options.dsn = Some(dsn);
    options.default_integrations = true;
    options.in_app_exclude.push("actix");
    options.in_app_exclude.push("sentry");
    options.in_app_exclude.push("tokio");
    options.release = Some(config.version.to_string().into());
    options.attach_stacktrace = true;
    options.traces_sample_rate = config.sentry.traces_sample_rate;

    Some(sentry::init(options))
}

/// Configure Sentry integration by wrapping a function.
///
/// The client stays alive until `func` completes.
pub async fn with_sentry_configuration<T, Fut, E>(config: &Config, func: T) -> Result<(), E>
where
    T: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let _guard = init_client(config);

    func().await
}
