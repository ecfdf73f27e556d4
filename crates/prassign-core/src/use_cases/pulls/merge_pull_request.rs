use async_trait::async_trait;
use prassign_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

/// Mark a pull request as merged. Merging a merged pull request is a no-op.
#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        let mut pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        if pull_request.is_merged() {
            return Ok(pull_request);
        }

        pull_request.status = PullRequestStatus::Merged;
        pull_request.merged_at = Some(OffsetDateTime::now_utc());
        let pull_request = ctx.db_service.pull_requests_update(pull_request).await?;

        info!(
            pull_request_id = %pull_request.pull_request_id,
            message = "Pull request merged"
        );

        Ok(pull_request)
    }
}
