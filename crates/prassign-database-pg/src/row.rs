use prassign_models::{PullRequest, User};
use sqlx::{postgres::PgRow, FromRow, Row};
use time::OffsetDateTime;

use crate::fields::PullRequestStatusDecode;

pub(crate) struct UserRow(User);
/// Pull request without its reviewers.
pub(crate) struct PullRequestRow(PullRequest);

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            team_name: row.try_get("team_name")?,
            is_active: row.try_get("is_active")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            pull_request_id: row.try_get("pull_request_id")?,
            pull_request_name: row.try_get("pull_request_name")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status")?,
            assigned_reviewers: Vec::new(),
            created_at: Some(row.try_get::<OffsetDateTime, _>("created_at")?),
            merged_at: row.try_get("merged_at")?,
        }))
    }
}
