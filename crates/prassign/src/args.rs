use std::sync::Arc;

use clap::Parser;
use prassign_config::{Config, DatabaseDriver};
use prassign_core::{ChaChaRandomService, CoreModule};
use prassign_database_interface::DbService;
use prassign_database_memory::MemoryDb;
use prassign_database_pg::{establish_pool_connection, run_migrations, PostgresDb};
use prassign_sentry::with_sentry_configuration;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = "Pull request reviewer assignment service", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Box<dyn DbService> = {
                if config.database.driver == DatabaseDriver::Postgres {
                    info!("Using PostgresDb database driver");

                    let pool = establish_pool_connection(&config).await?;
                    run_migrations(&pool).await?;

                    Box::new(PostgresDb::new(pool))
                } else {
                    info!("Using MemoryDb database driver");
                    Box::new(MemoryDb::new())
                }
            };

            let ctx = CommandContext {
                random_service: Box::new(ChaChaRandomService::new(config.random_seed)),
                config: config.clone(),
                db_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        actix_rt::System::with_tokio_rt(|| runtime).block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
