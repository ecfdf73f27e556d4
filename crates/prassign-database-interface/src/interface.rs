use std::collections::BTreeMap;

use async_trait::async_trait;
use prassign_models::{PullRequest, PullRequestCounts, Team, User};

use crate::{DatabaseError, Result};

#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    /// Create the team and upsert its members in one step.
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, team_name: &str) -> Result<Team> {
        self.teams_get(team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(team_name.into()))
    }
    async fn teams_exists(&self, team_name: &str) -> Result<bool>;

    async fn users_batch_upsert(&self, instances: Vec<User>) -> Result<Vec<User>>;
    async fn users_update(&self, instance: User) -> Result<User>;
    async fn users_get(&self, user_id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, user_id: &str) -> Result<User> {
        self.users_get(user_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))
    }
    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>>;
    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User>;
    async fn users_deactivate_team(&self, team_name: &str) -> Result<()>;
    /// Deactivate every member of the team and drop the assignments of
    /// `member_ids` on `pull_request_ids`, atomically.
    ///
    /// Merged pull requests are left untouched. Returns the IDs of the pull
    /// requests which lost at least one reviewer.
    async fn users_deactivate_team_and_unassign(
        &self,
        team_name: &str,
        pull_request_ids: &[String],
        member_ids: &[String],
    ) -> Result<Vec<String>>;

    /// Create the pull request with its `assigned_reviewers`, atomically.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, pull_request_id: &str) -> Result<PullRequest> {
        self.pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }
    /// Persist name, status and merge date. Reviewers are left untouched.
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool>;
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>>;
    async fn pull_requests_list_open_by_reviewers(
        &self,
        user_ids: &[String],
    ) -> Result<Vec<PullRequest>>;

    async fn reviewers_assign(&self, pull_request_id: &str, user_id: &str) -> Result<()>;
    async fn reviewers_remove(&self, pull_request_id: &str, user_id: &str) -> Result<bool>;
    async fn reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>>;
    async fn reviewers_is_assigned(&self, pull_request_id: &str, user_id: &str) -> Result<bool>;
    /// Swap `old_user_id` for `new_user_id`, keeping the assignment position.
    async fn reviewers_replace(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()>;

    async fn statistics_assignment_counts(&self) -> Result<BTreeMap<String, u64>>;
    async fn statistics_pull_request_counts(&self) -> Result<PullRequestCounts>;
}
