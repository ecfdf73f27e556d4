use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::statistics::GetStatisticsInterface;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Show assignment statistics
#[derive(Parser)]
pub(crate) struct StatisticsCommand;

#[async_trait]
impl Command for StatisticsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_statistics: &dyn GetStatisticsInterface = ctx.core_module.resolve_ref();
        let statistics = get_statistics.run(&ctx.as_core_context()).await?;

        let mut writer = ctx.writer.write().await;
        let counts = &statistics.pull_requests;
        writeln!(
            writer,
            "Pull requests: {} total, {} open, {} merged.",
            counts.total, counts.open, counts.merged
        )?;

        if statistics.assignments_by_user.is_empty() {
            writeln!(writer, "No review assignment.")?;
        } else {
            writeln!(writer, "Review assignments:")?;
            for (username, count) in &statistics.assignments_by_user {
                writeln!(writer, "- {}: {}", username, count)?;
            }
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
    async fn run_empty() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["statistics"]).await,
            "Pull requests: 0 total, 0 open, 0 merged.\nNo review assignment.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        seed_team(&ctx, "backend", &[("a", true), ("b", true), ("c", true)]).await;
        ctx.db_service
            .pull_requests_create(PullRequest {
                pull_request_id: "pr-1".into(),
                pull_request_name: "One".into(),
                author_id: "a".into(),
                assigned_reviewers: vec!["b".into(), "c".into()],
                ..Default::default()
            })
            .await?;
        ctx.db_service
            .pull_requests_create(PullRequest {
                pull_request_id: "pr-2".into(),
                pull_request_name: "Two".into(),
                author_id: "c".into(),
                assigned_reviewers: vec!["b".into()],
                ..Default::default()
            })
            .await?;

        assert_eq!(
            test_command(ctx, &["statistics"]).await,
            "Pull requests: 2 total, 2 open, 0 merged.\nReview assignments:\n- A: 0\n- B: 2\n- C: 1\n"
        );

        Ok(())
    }
}
