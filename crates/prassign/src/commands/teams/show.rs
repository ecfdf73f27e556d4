use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::teams::GetTeamInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show team members
#[derive(Parser)]
pub(crate) struct TeamShowCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
        let team = get_team
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Team '{}':", team.team_name)?;
        for member in team.members {
            writeln!(
                writer,
                "- {} ({}), {}",
                member.user_id,
                member.username,
                if member.is_active { "active" } else { "inactive" }
            )?;
        }

        Ok(())
    }
}
