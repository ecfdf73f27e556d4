use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::Data,
    App,
};
use prassign_config::{Config, DatabaseDriver};
use prassign_core::CoreModule;
use prassign_database_memory::MemoryDb;

use crate::{
    metrics::build_metrics_handler,
    server::{build_actix_app, AppContext},
};

pub(crate) fn test_context() -> AppContext {
    let mut config = Config::from_env_no_version();
    config.database.driver = DatabaseDriver::Memory;
    config.random_seed = 1;
    config.reviewers.count = 2;
    config.deactivation.timeout_ms = 1000;

    AppContext::new_with_adapters(config, CoreModule::builder().build(), Box::new(MemoryDb::new()))
}

pub(crate) fn build_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    build_actix_app(
        Data::new(test_context()),
        build_metrics_handler().unwrap(),
    )
}
