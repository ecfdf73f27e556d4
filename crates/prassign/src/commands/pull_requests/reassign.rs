use async_trait::async_trait;
use clap::Parser;
use prassign_core::use_cases::pulls::ReassignReviewerInterface;
use shaku::HasComponent;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// Replace a reviewer on a pull request
#[derive(Parser)]
pub(crate) struct PullRequestReassignCommand {
    /// Pull request ID
    pull_request_id: String,
    /// Reviewer to replace
    old_user_id: String,
}

#[async_trait]
impl Command for PullRequestReassignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
        let reassignment = reassign_reviewer
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.old_user_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer '{}' replaced by '{}' on pull request '{}' (reviewers: {}).",
            self.old_user_id,
            reassignment.replaced_by,
            reassignment.pull_request.pull_request_id,
            format_reviewers(&reassignment.pull_request.assigned_reviewers)
        )?;

        Ok(())
    }
}
