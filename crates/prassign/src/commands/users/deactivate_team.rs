use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::users::DeactivateTeamMembersInterface;
use shaku::HasComponent;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// Deactivate every member of a team
#[derive(Parser)]
pub(crate) struct UserDeactivateTeamCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for UserDeactivateTeamCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let deactivate_team_members: &dyn DeactivateTeamMembersInterface =
            ctx.core_module.resolve_ref();
        let affected = deactivate_team_members
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Members of team '{}' deactivated, {} open pull request(s) affected.",
            self.team_name,
            affected.len()
        )?;
        for pr in affected {
            writeln!(
                writer,
                "- {}: reviewers {}",
                pr.pull_request_id,
                format_reviewers(&pr.assigned_reviewers)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use prassign_database_interface::DbService;
    use prassign_models::PullRequest;

    use crate::testutils::{seed_team, test_command, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        seed_team(&ctx, "backend", &[("a", true), ("b", true)]).await;
        seed_team(&ctx, "frontend", &[("x", true)]).await;
        ctx.db_service
            .pull_requests_create(PullRequest {
                pull_request_id: "pr-1".into(),
                pull_request_name: "One".into(),
                author_id: "a".into(),
                assigned_reviewers: vec!["x".into(), "b".into()],
                ..Default::default()
            })
            .await?;

        assert_eq!(
            test_command(ctx, &["users", "deactivate-team", "frontend"]).await,
            "Members of team 'frontend' deactivated, 1 open pull request(s) affected.\n- pr-1: reviewers b\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_unknown_team() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["users", "deactivate-team", "ghosts"]).await,
            "Members of team 'ghosts' deactivated, 0 open pull request(s) affected.\n"
        );

        Ok(())
    }
}
