use prassign_database_interface::{DbService, Result};
use prassign_models::{PullRequest, Team, TeamMember};
use time::{Duration, OffsetDateTime};

pub(crate) fn member(user_id: &str, is_active: bool) -> TeamMember {
    TeamMember {
        user_id: user_id.into(),
        username: format!("user-{user_id}"),
        is_active,
    }
}

pub(crate) async fn create_team(
    db: &dyn DbService,
    team_name: &str,
    members: &[(&str, bool)],
) -> Result<Team> {
    db.teams_create(Team {
        team_name: team_name.into(),
        members: members.iter().map(|(id, a)| member(id, *a)).collect(),
    })
    .await
}

/// Creation dates are spaced by one minute per `age` step, from a fixed origin.
pub(crate) fn pull_request(id: &str, author_id: &str, reviewers: &[&str], age: i64) -> PullRequest {
    PullRequest {
        pull_request_id: id.into(),
        pull_request_name: format!("Pull request {id}"),
        author_id: author_id.into(),
        assigned_reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
        created_at: Some(
            OffsetDateTime::UNIX_EPOCH + Duration::days(20_000) + Duration::minutes(age),
        ),
        ..Default::default()
    }
}
