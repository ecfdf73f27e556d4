use async_trait::async_trait;
use prassign_models::PullRequestShort;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
}

/// Pull requests a user reviews, newest first. Unknown users have none.
#[derive(Component)]
#[shaku(interface = ListUserReviewsInterface)]
pub(crate) struct ListUserReviews;

#[async_trait]
impl ListUserReviewsInterface for ListUserReviews {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        Ok(ctx
            .db_service
            .pull_requests_list_by_reviewer(user_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
