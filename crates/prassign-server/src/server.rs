//! Server module.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use prassign_config::Config;
use prassign_core::{ChaChaRandomService, CoreContext, CoreModule, RandomService};
use prassign_database_interface::DbService;
use prassign_database_pg::{DbPool, PostgresDb};
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    api::configure_api_handlers, health::health_check_route, metrics::build_metrics_handler,
    ApiError, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
    /// Random source for reviewer selection.
    pub random_service: Box<dyn RandomService>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule, pool: DbPool) -> Self {
        Self::new_with_adapters(config, core_module, Box::new(PostgresDb::new(pool)))
    }

    /// Create new app context using a database adapter.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        db_service: Box<dyn DbService>,
    ) -> Self {
        Self {
            random_service: Box::new(ChaChaRandomService::new(config.random_seed)),
            config,
            core_module,
            db_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
            random_service: self.random_service.as_ref(),
        }
    }
}

fn invalid_input_response(message: String) -> actix_web::Error {
    error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(ApiError::body("INVALID_INPUT", &message)),
    )
    .into()
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/api/v1")
                .wrap(Cors::permissive())
                .configure(configure_api_handlers),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on prassign!" }))
            }),
        )
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            invalid_input_response(err.to_string())
        }))
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| invalid_input_response(err.to_string())),
        )
}

/// Run server.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting server",
    );

    run_bot_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_bot_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();
    let prometheus = build_metrics_handler()?;

    let mut server =
        HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}

#[cfg(test)]
mod tests {
    use actix_web::test;

    use super::*;
    use crate::testutils::build_test_app;

    #[::core::prelude::v1::test]
    fn bind_address() {
        let mut config = Config::from_env_no_version();
        config.server.bind_ip = "0.0.0.0".into();
        config.server.bind_port = 8080;
        assert_eq!(get_bind_address(&config), "0.0.0.0:8080");
    }

    #[actix_web::test]
    async fn welcome_and_health() {
        let app = test::init_service(build_test_app()).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert_eq!(body, serde_json::json!({"database": true}));
    }
}
