use prassign_config::Config;
use prassign_database_interface::DbService;

use crate::{CoreModule, RandomService};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub random_service: &'a (dyn RandomService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use prassign_config::Config;
    use prassign_database_memory::MemoryDb;

    use crate::{ChaChaRandomService, CoreContext, CoreModule, RandomService};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub random_service: Box<dyn RandomService>,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let mut config = Config::from_env_no_version();
            config.random_seed = 1;
            config.reviewers.count = 2;
            config.deactivation.timeout_ms = 1000;

            Self {
                random_service: Box::new(ChaChaRandomService::new(config.random_seed)),
                config,
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                random_service: &*self.random_service,
            }
        }
    }
}
