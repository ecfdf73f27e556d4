use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::users::ListUserReviewsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests a user reviews
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User ID
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list_user_reviews
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "No review assigned to user '{}'.", self.user_id)?;
        } else {
            writeln!(writer, "Reviews assigned to user '{}':", self.user_id)?;
            for pr in pull_requests {
                writeln!(
                    writer,
                    "- {} '{}' by {} ({})",
                    pr.pull_request_id, pr.pull_request_name, pr.author_id, pr.status
                )?;
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
    use prassign_models::{PullRequest, PullRequestStatus};
    use time::{Duration, OffsetDateTime};

    use crate::testutils::{seed_team, test_command, CommandContextTest};

    #[tokio::test]
    async fn run_empty() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["users", "reviews", "nobody"]).await,
            "No review assigned to user 'nobody'.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        seed_team(&ctx, "backend", &[("a", true), ("b", true)]).await;
        for (id, status, age) in [
            ("pr-1", PullRequestStatus::Merged, 0),
            ("pr-2", PullRequestStatus::Open, 1),
        ] {
            ctx.db_service
                .pull_requests_create(PullRequest {
                    pull_request_id: id.into(),
                    pull_request_name: format!("Change {id}"),
                    author_id: "a".into(),
                    status,
                    assigned_reviewers: vec!["b".into()],
                    created_at: Some(OffsetDateTime::UNIX_EPOCH + Duration::hours(age)),
                    ..Default::default()
                })
                .await?;
        }

        assert_eq!(
            test_command(ctx, &["users", "reviews", "b"]).await,
            "Reviews assigned to user 'b':\n- pr-2 'Change pr-2' by a (OPEN)\n- pr-1 'Change pr-1' by a (MERGED)\n"
        );

        Ok(())
    }
}
