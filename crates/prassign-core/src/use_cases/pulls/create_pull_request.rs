use async_trait::async_trait;
use prassign_models::{PullRequest, PullRequestStatus};
use shaku::{Component, HasComponent, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{use_cases::pulls::SelectReviewersInterface, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        pull_request_name: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if pull_request_id.trim().is_empty() || author_id.trim().is_empty() {
            return Err(DomainError::invalid_input(
                "pull_request_id and author_id are required",
            ));
        }

        if ctx.db_service.pull_requests_exists(pull_request_id).await? {
            return Err(DomainError::PullRequestExists {
                pull_request_id: pull_request_id.into(),
            });
        }

        let author = ctx.db_service.users_get_expect(author_id).await?;

        let select_reviewers: &dyn SelectReviewersInterface = ctx.core_module.resolve_ref();
        let reviewers = select_reviewers.run(ctx, &author).await?;

        let pull_request = ctx
            .db_service
            .pull_requests_create(PullRequest {
                pull_request_id: pull_request_id.into(),
                pull_request_name: pull_request_name.into(),
                author_id: author.user_id,
                status: PullRequestStatus::Open,
                assigned_reviewers: reviewers,
                created_at: Some(OffsetDateTime::now_utc()),
                merged_at: None,
            })
            .await?;

        info!(
            pull_request_id = %pull_request.pull_request_id,
            reviewers = ?pull_request.assigned_reviewers,
            message = "Pull request created"
        );

        Ok(pull_request)
    }
}
