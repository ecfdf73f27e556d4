use std::{io::Write, sync::Arc};

use clap::Parser;
use prassign_config::{Config, DatabaseDriver};
use prassign_core::{ChaChaRandomService, CoreModule};
use prassign_database_memory::MemoryDb;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let mut config = Config::from_env_no_version();
        config.database.driver = DatabaseDriver::Memory;
        config.reviewers.count = 2;
        config.deactivation.timeout_ms = 1000;

        Self {
            config,
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            random_service: Box::new(ChaChaRandomService::new(1)),
            writer,
        }
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["prassign"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}

pub(crate) async fn test_command_error(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> anyhow::Error {
    let mut args = vec!["prassign"];
    args.extend(command_args);

    let args = Args::try_parse_from(args).unwrap();
    let buf = Arc::new(RwLock::new(Vec::new()));
    CommandExecutor::parse_args_async(args, ctx.into_context(buf))
        .await
        .unwrap_err()
}

/// Seed the store with a team, bypassing validation.
pub(crate) async fn seed_team(ctx: &CommandContextTest, team_name: &str, members: &[(&str, bool)]) {
    use prassign_database_interface::DbService;
    use prassign_models::{Team, TeamMember};

    ctx.db_service
        .teams_create(Team {
            team_name: team_name.into(),
            members: members
                .iter()
                .map(|(id, is_active)| TeamMember {
                    user_id: id.to_string(),
                    username: id.to_uppercase(),
                    is_active: *is_active,
                })
                .collect(),
        })
        .await
        .unwrap();
}
