use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap, HashSet},
    sync::RwLock,
};

use async_trait::async_trait;
use prassign_database_interface::{DatabaseError, DbService, Result};
use prassign_models::{PullRequest, PullRequestCounts, PullRequestStatus, Team, User};

/// In-memory store.
///
/// Operations spanning several collections take their write locks in
/// declaration order: teams, users, pull requests, reviewers.
#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashSet<String>>,
    users: RwLock<HashMap<String, User>>,
    /// Stored without reviewers, those live in `reviewers`.
    pull_requests: RwLock<HashMap<String, PullRequest>>,
    reviewers: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn conflict(message: String) -> DatabaseError {
        DatabaseError::ImplementationError {
            source: message.into(),
        }
    }

    fn team_members(users: &HashMap<String, User>, team_name: &str) -> Vec<User> {
        let mut values: Vec<_> = users
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        values
    }

    fn with_reviewers(
        stored: &PullRequest,
        reviewers: &HashMap<String, Vec<String>>,
    ) -> PullRequest {
        let mut instance = stored.clone();
        instance.assigned_reviewers = reviewers
            .get(&instance.pull_request_id)
            .cloned()
            .unwrap_or_default();
        instance
    }

    fn list_pull_requests<F>(&self, filter: F) -> Vec<PullRequest>
    where
        F: Fn(&PullRequest) -> bool,
    {
        let pull_requests = self.pull_requests.read().unwrap();
        let reviewers = self.reviewers.read().unwrap();

        let mut values: Vec<_> = pull_requests
            .values()
            .map(|pr| Self::with_reviewers(pr, &reviewers))
            .filter(|pr| filter(pr))
            .collect();
        values.sort_by(|a, b| {
            (Reverse(a.created_at), Reverse(&a.pull_request_id))
                .cmp(&(Reverse(b.created_at), Reverse(&b.pull_request_id)))
        });
        values
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ////////
    // Teams

    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut teams = self.teams.write().unwrap();
        let mut users = self.users.write().unwrap();

        if teams.contains(&instance.team_name) {
            return Err(Self::conflict(format!(
                "duplicate team '{}'",
                instance.team_name
            )));
        }

        teams.insert(instance.team_name.clone());
        for user in instance.users() {
            users.insert(user.user_id.clone(), user);
        }

        Ok(Team {
            members: Self::team_members(&users, &instance.team_name)
                .into_iter()
                .map(Into::into)
                .collect(),
            team_name: instance.team_name,
        })
    }

    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>> {
        if !self.teams.read().unwrap().contains(team_name) {
            return Ok(None);
        }

        let users = self.users.read().unwrap();
        Ok(Some(Team {
            team_name: team_name.into(),
            members: Self::team_members(&users, team_name)
                .into_iter()
                .map(Into::into)
                .collect(),
        }))
    }

    async fn teams_exists(&self, team_name: &str) -> Result<bool> {
        Ok(self.teams.read().unwrap().contains(team_name))
    }

    ////////
    // Users

    async fn users_batch_upsert(&self, instances: Vec<User>) -> Result<Vec<User>> {
        let mut users = self.users.write().unwrap();
        for instance in &instances {
            users.insert(instance.user_id.clone(), instance.clone());
        }
        Ok(instances)
    }

    async fn users_update(&self, instance: User) -> Result<User> {
        let mut users = self.users.write().unwrap();
        match users.get_mut(&instance.user_id) {
            Some(user) => {
                *user = instance.clone();
                Ok(instance)
            }
            None => Err(DatabaseError::UnknownUser(instance.user_id)),
        }
    }

    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(user_id).cloned())
    }

    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        Ok(Self::team_members(&self.users.read().unwrap(), team_name))
    }

    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User> {
        let mut users = self.users.write().unwrap();
        match users.get_mut(user_id) {
            Some(user) => {
                user.is_active = value;
                Ok(user.clone())
            }
            None => Err(DatabaseError::UnknownUser(user_id.into())),
        }
    }

    async fn users_deactivate_team(&self, team_name: &str) -> Result<()> {
        for user in self.users.write().unwrap().values_mut() {
            if user.team_name == team_name {
                user.is_active = false;
            }
        }
        Ok(())
    }

    async fn users_deactivate_team_and_unassign(
        &self,
        team_name: &str,
        pull_request_ids: &[String],
        member_ids: &[String],
    ) -> Result<Vec<String>> {
        let mut users = self.users.write().unwrap();
        let pull_requests = self.pull_requests.read().unwrap();
        let mut reviewers = self.reviewers.write().unwrap();

        for user in users.values_mut() {
            if user.team_name == team_name {
                user.is_active = false;
            }
        }

        let mut unassigned = Vec::new();
        for pull_request_id in pull_request_ids {
            let is_open = pull_requests
                .get(pull_request_id)
                .map(|pr| pr.status == PullRequestStatus::Open)
                .unwrap_or(false);
            if !is_open {
                continue;
            }

            if let Some(assigned) = reviewers.get_mut(pull_request_id) {
                let count = assigned.len();
                assigned.retain(|r| !member_ids.contains(r));
                if assigned.len() != count {
                    unassigned.push(pull_request_id.clone());
                }
            }
        }

        Ok(unassigned)
    }

    ////////////////
    // Pull requests

    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let mut reviewers = self.reviewers.write().unwrap();

        if pull_requests.contains_key(&instance.pull_request_id) {
            return Err(Self::conflict(format!(
                "duplicate pull request '{}'",
                instance.pull_request_id
            )));
        }

        let mut assigned: Vec<String> = Vec::with_capacity(instance.assigned_reviewers.len());
        for reviewer in &instance.assigned_reviewers {
            if !assigned.contains(reviewer) {
                assigned.push(reviewer.clone());
            }
        }

        let mut stored = instance.clone();
        stored.assigned_reviewers = Vec::new();
        reviewers.insert(instance.pull_request_id.clone(), assigned.clone());
        pull_requests.insert(instance.pull_request_id.clone(), stored);

        Ok(PullRequest {
            assigned_reviewers: assigned,
            ..instance
        })
    }

    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        let pull_requests = self.pull_requests.read().unwrap();
        let reviewers = self.reviewers.read().unwrap();
        Ok(pull_requests
            .get(pull_request_id)
            .map(|pr| Self::with_reviewers(pr, &reviewers)))
    }

    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        {
            let mut pull_requests = self.pull_requests.write().unwrap();
            let stored = pull_requests
                .get_mut(&instance.pull_request_id)
                .ok_or_else(|| DatabaseError::UnknownPullRequest(instance.pull_request_id.clone()))?;

            stored.pull_request_name = instance.pull_request_name.clone();
            stored.status = instance.status;
            stored.merged_at = instance.merged_at;
        }

        self.pull_requests_get_expect(&instance.pull_request_id)
            .await
    }

    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        Ok(self
            .pull_requests
            .read()
            .unwrap()
            .contains_key(pull_request_id))
    }

    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        Ok(self.list_pull_requests(|pr| pr.has_reviewer(user_id)))
    }

    async fn pull_requests_list_open_by_reviewers(
        &self,
        user_ids: &[String],
    ) -> Result<Vec<PullRequest>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.list_pull_requests(|pr| {
            pr.status == PullRequestStatus::Open
                && pr.assigned_reviewers.iter().any(|r| user_ids.contains(r))
        }))
    }

    ////////////
    // Reviewers

    async fn reviewers_assign(&self, pull_request_id: &str, user_id: &str) -> Result<()> {
        if !self.pull_requests_exists(pull_request_id).await? {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }

        let mut reviewers = self.reviewers.write().unwrap();
        let assigned = reviewers.entry(pull_request_id.into()).or_default();
        if !assigned.iter().any(|r| r == user_id) {
            assigned.push(user_id.into());
        }
        Ok(())
    }

    async fn reviewers_remove(&self, pull_request_id: &str, user_id: &str) -> Result<bool> {
        let mut reviewers = self.reviewers.write().unwrap();
        match reviewers.get_mut(pull_request_id) {
            Some(assigned) => {
                let before = assigned.len();
                assigned.retain(|r| r != user_id);
                Ok(assigned.len() != before)
            }
            None => Ok(false),
        }
    }

    async fn reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>> {
        Ok(self
            .reviewers
            .read()
            .unwrap()
            .get(pull_request_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn reviewers_is_assigned(&self, pull_request_id: &str, user_id: &str) -> Result<bool> {
        Ok(self
            .reviewers
            .read()
            .unwrap()
            .get(pull_request_id)
            .map(|assigned| assigned.iter().any(|r| r == user_id))
            .unwrap_or(false))
    }

    async fn reviewers_replace(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()> {
        let mut reviewers = self.reviewers.write().unwrap();
        let assigned = reviewers
            .get_mut(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;

        if assigned.iter().any(|r| r == new_user_id) {
            return Err(Self::conflict(format!(
                "user '{new_user_id}' already reviews pull request '{pull_request_id}'"
            )));
        }

        let slot = assigned
            .iter_mut()
            .find(|r| *r == old_user_id)
            .ok_or_else(|| DatabaseError::UnknownUser(old_user_id.into()))?;
        *slot = new_user_id.into();
        Ok(())
    }

    /////////////
    // Statistics

    async fn statistics_assignment_counts(&self) -> Result<BTreeMap<String, u64>> {
        let users = self.users.read().unwrap();
        let reviewers = self.reviewers.read().unwrap();

        let mut per_user: HashMap<&str, u64> = HashMap::new();
        for user_id in reviewers.values().flatten() {
            *per_user.entry(user_id.as_str()).or_default() += 1;
        }

        let mut counts = BTreeMap::new();
        for user in users.values() {
            *counts.entry(user.username.clone()).or_default() +=
                per_user.get(user.user_id.as_str()).copied().unwrap_or(0);
        }
        Ok(counts)
    }

    async fn statistics_pull_request_counts(&self) -> Result<PullRequestCounts> {
        let pull_requests = self.pull_requests.read().unwrap();
        let merged = pull_requests
            .values()
            .filter(|pr| pr.is_merged())
            .count() as u64;
        let total = pull_requests.len() as u64;

        Ok(PullRequestCounts {
            total,
            open: total - merged,
            merged,
        })
    }
}
