use async_trait::async_trait;
use prassign_models::PullRequest;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    /// ID of the new reviewer.
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<Reassignment>;
}

/// Replace one reviewer by a random active member of their own team.
///
/// The author, the replaced reviewer and already assigned reviewers are never
/// picked. The new reviewer takes the old one's position.
#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<Reassignment> {
        let mut pull_request = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        if pull_request.is_merged() {
            return Err(DomainError::PullRequestMerged {
                pull_request_id: pull_request_id.into(),
            });
        }

        if !pull_request.has_reviewer(old_user_id) {
            return Err(DomainError::NotAssigned {
                pull_request_id: pull_request_id.into(),
                user_id: old_user_id.into(),
            });
        }

        let old_user = ctx.db_service.users_get_expect(old_user_id).await?;
        let candidates: Vec<String> = ctx
            .db_service
            .users_list_by_team(&old_user.team_name)
            .await?
            .into_iter()
            .filter(|u| {
                u.is_active
                    && u.user_id != old_user_id
                    && u.user_id != pull_request.author_id
                    && !pull_request.has_reviewer(&u.user_id)
            })
            .map(|u| u.user_id)
            .collect();

        if candidates.is_empty() {
            return Err(DomainError::NoCandidate {
                pull_request_id: pull_request_id.into(),
            });
        }

        let replaced_by = candidates[ctx.random_service.pick(candidates.len())].clone();
        ctx.db_service
            .reviewers_replace(pull_request_id, old_user_id, &replaced_by)
            .await?;
        pull_request.replace_reviewer(old_user_id, &replaced_by);

        info!(
            pull_request_id = %pull_request_id,
            old_user_id = %old_user_id,
            replaced_by = %replaced_by,
            message = "Reviewer reassigned"
        );

        Ok(Reassignment {
            pull_request,
            replaced_by,
        })
    }
}
