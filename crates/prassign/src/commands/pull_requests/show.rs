use async_trait::async_trait;
use clap::Parser;
use prassign_core::DomainError;
use prassign_database_interface::DbService;

use crate::{
    commands::{format_reviewers, Command, CommandContext},
    Result,
};

/// Show pull request info
#[derive(Parser)]
pub(crate) struct PullRequestShowCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let pr = ctx
            .db_service
            .pull_requests_get_expect(&self.pull_request_id)
            .await
            .map_err(DomainError::from)?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Pull request '{}':", pr.pull_request_id)?;
        writeln!(writer, "- name: {}", pr.pull_request_name)?;
        writeln!(writer, "- author: {}", pr.author_id)?;
        writeln!(writer, "- status: {}", pr.status)?;
        writeln!(
            writer,
            "- reviewers: {}",
            format_reviewers(&pr.assigned_reviewers)
        )?;

        Ok(())
    }
}
