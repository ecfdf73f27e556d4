use async_trait::async_trait;
use prassign_models::PullRequest;
use shaku::{Component, Interface};
use tracing::info;

use crate::{deadline::with_deadline, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DeactivateTeamMembersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Vec<PullRequest>>;
}

/// Deactivate every member of a team and drop their open review assignments.
///
/// Returns the affected open pull requests with their remaining reviewers.
/// Removed reviewers are not replaced. Loading the team and its open pull
/// requests runs under the configured deactivation deadline. The writes
/// happen afterwards in a single store transaction, so an expired deadline
/// leaves the store unchanged.
#[derive(Component)]
#[shaku(interface = DeactivateTeamMembersInterface)]
pub(crate) struct DeactivateTeamMembers;

impl DeactivateTeamMembers {
    async fn load<'a>(
        ctx: &CoreContext<'a>,
        team_name: &str,
    ) -> Result<Option<(Vec<String>, Vec<PullRequest>)>> {
        let members = ctx.db_service.users_list_by_team(team_name).await?;
        if members.is_empty() {
            return Ok(None);
        }

        let member_ids: Vec<String> = members.into_iter().map(|m| m.user_id).collect();
        let affected = ctx
            .db_service
            .pull_requests_list_open_by_reviewers(&member_ids)
            .await?;

        Ok(Some((member_ids, affected)))
    }
}

#[async_trait]
impl DeactivateTeamMembersInterface for DeactivateTeamMembers {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Vec<PullRequest>> {
        let loaded = with_deadline(
            ctx.config.deactivation.timeout_ms,
            Self::load(ctx, team_name),
        )
        .await?;
        let Some((member_ids, affected)) = loaded else {
            return Ok(Vec::new());
        };

        let affected_ids: Vec<String> = affected
            .iter()
            .map(|pr| pr.pull_request_id.clone())
            .collect();
        let unassigned = ctx
            .db_service
            .users_deactivate_team_and_unassign(team_name, &affected_ids, &member_ids)
            .await?;

        // Pull requests merged since loading keep their reviewers.
        let affected: Vec<PullRequest> = affected
            .into_iter()
            .filter(|pr| unassigned.contains(&pr.pull_request_id))
            .map(|mut pr| {
                pr.assigned_reviewers.retain(|r| !member_ids.contains(r));
                pr
            })
            .collect();

        info!(
            team_name = team_name,
            members_count = member_ids.len(),
            affected_pull_requests = affected.len(),
            message = "Team members deactivated"
        );

        Ok(affected)
    }
}
