use async_trait::async_trait;
use prassign_models::Statistics;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetStatisticsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Statistics>;
}

#[derive(Component)]
#[shaku(interface = GetStatisticsInterface)]
pub(crate) struct GetStatistics;

#[async_trait]
impl GetStatisticsInterface for GetStatistics {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Statistics> {
        Ok(Statistics {
            assignments_by_user: ctx.db_service.statistics_assignment_counts().await?,
            pull_requests: ctx.db_service.statistics_pull_request_counts().await?,
        })
    }
}
