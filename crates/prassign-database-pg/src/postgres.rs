use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use prassign_database_interface::{DatabaseError, DbService, Result};
use prassign_models::{PullRequest, PullRequestCounts, Team, User};
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};
use time::OffsetDateTime;

use crate::row::{PullRequestRow, UserRow};

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            Self::wrap_error(e)
        }
    }

    fn wrap_unknown_pull_request(e: sqlx::Error, pull_request_id: &str) -> DatabaseError {
        Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }

    fn wrap_unknown_user(e: sqlx::Error, user_id: &str) -> DatabaseError {
        Self::wrap_row_not_found(e, DatabaseError::UnknownUser(user_id.into()))
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(Self::wrap_error)
    }

    async fn commit(transaction: Transaction<'static, Postgres>) -> Result<()> {
        transaction.commit().await.map_err(Self::wrap_error)
    }

    async fn upsert_user(connection: &mut PgConnection, instance: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (
                user_id,
                username,
                team_name,
                is_active
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            )
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                team_name = EXCLUDED.team_name,
                is_active = EXCLUDED.is_active
        "#,
        )
        .bind(&instance.user_id)
        .bind(&instance.username)
        .bind(&instance.team_name)
        .bind(instance.is_active)
        .execute(connection)
        .await
        .map_err(Self::wrap_error)?;

        Ok(())
    }

    /// Reviewers of each pull request, in assignment order.
    async fn reviewers_by_pull_request(
        &self,
        pull_request_ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>> {
        let rows = sqlx::query(
            r#"
            SELECT pull_request_id, user_id
            FROM pull_request_reviewers
            WHERE pull_request_id = ANY($1)
            ORDER BY pull_request_id, position
        "#,
        )
        .bind(pull_request_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        let mut reviewers: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let pull_request_id: String = row.try_get("pull_request_id").map_err(Self::wrap_error)?;
            let user_id: String = row.try_get("user_id").map_err(Self::wrap_error)?;
            reviewers.entry(pull_request_id).or_default().push(user_id);
        }

        Ok(reviewers)
    }

    async fn with_reviewers(&self, rows: Vec<PullRequestRow>) -> Result<Vec<PullRequest>> {
        let mut values: Vec<PullRequest> = rows.into_iter().map(Into::into).collect();
        let ids: Vec<String> = values.iter().map(|pr| pr.pull_request_id.clone()).collect();
        let mut reviewers = self.reviewers_by_pull_request(&ids).await?;

        for value in &mut values {
            value.assigned_reviewers = reviewers
                .remove(&value.pull_request_id)
                .unwrap_or_default();
        }

        Ok(values)
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO teams (team_name)
            VALUES ($1)
        "#,
        )
        .bind(&instance.team_name)
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?;

        for user in instance.users() {
            Self::upsert_user(&mut transaction, &user).await?;
        }

        Self::commit(transaction).await?;
        self.teams_get_expect(&instance.team_name).await
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, team_name: &str) -> Result<Option<Team>> {
        if !self.teams_exists(team_name).await? {
            return Ok(None);
        }

        let members = self.users_list_by_team(team_name).await?;
        Ok(Some(Team {
            team_name: team_name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_exists(&self, team_name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM teams WHERE team_name = $1)
        "#,
        )
        .bind(team_name)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn users_batch_upsert(&self, instances: Vec<User>) -> Result<Vec<User>> {
        let mut transaction = self.begin().await?;
        for instance in &instances {
            Self::upsert_user(&mut transaction, instance).await?;
        }
        Self::commit(transaction).await?;

        Ok(instances)
    }

    #[tracing::instrument(skip(self))]
    async fn users_update(&self, instance: User) -> Result<User> {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2,
                team_name = $3,
                is_active = $4
            WHERE user_id = $1
            RETURNING *
        "#,
        )
        .bind(&instance.user_id)
        .bind(&instance.username)
        .bind(&instance.team_name)
        .bind(instance.is_active)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|e| Self::wrap_unknown_user(e, &instance.user_id))
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT *
            FROM users
            WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT *
            FROM users
            WHERE team_name = $1
            ORDER BY user_id
        "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_is_active(&self, user_id: &str, value: bool) -> Result<User> {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET is_active = $2
            WHERE user_id = $1
            RETURNING *
        "#,
        )
        .bind(user_id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map(Into::into)
        .map_err(|e| Self::wrap_unknown_user(e, user_id))
    }

    #[tracing::instrument(skip(self))]
    async fn users_deactivate_team(&self, team_name: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_active = FALSE
            WHERE team_name = $1
        "#,
        )
        .bind(team_name)
        .execute(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn users_deactivate_team_and_unassign(
        &self,
        team_name: &str,
        pull_request_ids: &[String],
        member_ids: &[String],
    ) -> Result<Vec<String>> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            UPDATE users
            SET is_active = FALSE
            WHERE team_name = $1
        "#,
        )
        .bind(team_name)
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?;

        let mut unassigned = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM pull_request_reviewers
            WHERE pull_request_id = ANY($1)
            AND user_id = ANY($2)
            AND pull_request_id IN (
                SELECT pull_request_id
                FROM pull_requests
                WHERE status = 'OPEN'
                FOR UPDATE
            )
            RETURNING pull_request_id
        "#,
        )
        .bind(pull_request_ids)
        .bind(member_ids)
        .fetch_all(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?;

        Self::commit(transaction).await?;

        unassigned.sort();
        unassigned.dedup();
        Ok(unassigned)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut transaction = self.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO pull_requests
            (
                pull_request_id,
                pull_request_name,
                author_id,
                status,
                created_at,
                merged_at
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                $5,
                $6
            )
        "#,
        )
        .bind(&instance.pull_request_id)
        .bind(&instance.pull_request_name)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .bind(instance.created_at.unwrap_or_else(OffsetDateTime::now_utc))
        .bind(instance.merged_at)
        .execute(&mut *transaction)
        .await
        .map_err(Self::wrap_error)?;

        for (position, user_id) in instance.assigned_reviewers.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO pull_request_reviewers
                (
                    pull_request_id,
                    user_id,
                    position
                )
                VALUES
                (
                    $1,
                    $2,
                    $3
                )
                ON CONFLICT DO NOTHING
            "#,
            )
            .bind(&instance.pull_request_id)
            .bind(user_id)
            .bind(position as i32)
            .execute(&mut *transaction)
            .await
            .map_err(Self::wrap_error)?;
        }

        Self::commit(transaction).await?;
        self.pull_requests_get_expect(&instance.pull_request_id)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT *
            FROM pull_requests
            WHERE pull_request_id = $1
        "#,
        )
        .bind(pull_request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        match row {
            Some(row) => Ok(self.with_reviewers(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        sqlx::query(
            r#"
            UPDATE pull_requests
            SET pull_request_name = $2,
                status = $3,
                merged_at = $4
            WHERE pull_request_id = $1
            RETURNING pull_request_id
        "#,
        )
        .bind(&instance.pull_request_id)
        .bind(&instance.pull_request_name)
        .bind(instance.status.to_str())
        .bind(instance.merged_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::wrap_unknown_pull_request(e, &instance.pull_request_id))?;

        self.pull_requests_get_expect(&instance.pull_request_id)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM pull_requests WHERE pull_request_id = $1)
        "#,
        )
        .bind(pull_request_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT p.*
            FROM pull_requests p
            INNER JOIN pull_request_reviewers r ON r.pull_request_id = p.pull_request_id
            WHERE r.user_id = $1
            ORDER BY p.created_at DESC, p.pull_request_id DESC
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        self.with_reviewers(rows).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_open_by_reviewers(
        &self,
        user_ids: &[String],
    ) -> Result<Vec<PullRequest>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT p.*
            FROM pull_requests p
            WHERE p.status = 'OPEN'
            AND EXISTS (
                SELECT 1
                FROM pull_request_reviewers r
                WHERE r.pull_request_id = p.pull_request_id
                AND r.user_id = ANY($1)
            )
            ORDER BY p.created_at DESC, p.pull_request_id DESC
        "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        self.with_reviewers(rows).await
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_assign(&self, pull_request_id: &str, user_id: &str) -> Result<()> {
        if !self.pull_requests_exists(pull_request_id).await? {
            return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
        }

        sqlx::query(
            r#"
            INSERT INTO pull_request_reviewers
            (
                pull_request_id,
                user_id,
                position
            )
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
            FROM pull_request_reviewers
            WHERE pull_request_id = $1
            ON CONFLICT DO NOTHING
        "#,
        )
        .bind(pull_request_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_remove(&self, pull_request_id: &str, user_id: &str) -> Result<bool> {
        sqlx::query(
            r#"
            DELETE FROM pull_request_reviewers
            WHERE pull_request_id = $1
            AND user_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|r| r.rows_affected() > 0)
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_list(&self, pull_request_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT user_id
            FROM pull_request_reviewers
            WHERE pull_request_id = $1
            ORDER BY position
        "#,
        )
        .bind(pull_request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_is_assigned(&self, pull_request_id: &str, user_id: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM pull_request_reviewers
                WHERE pull_request_id = $1
                AND user_id = $2
            )
        "#,
        )
        .bind(pull_request_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn reviewers_replace(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<()> {
        let affected = sqlx::query(
            r#"
            UPDATE pull_request_reviewers
            SET user_id = $3,
                assigned_at = NOW()
            WHERE pull_request_id = $1
            AND user_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(old_user_id)
        .bind(new_user_id)
        .execute(&self.pool)
        .await
        .map_err(Self::wrap_error)?
        .rows_affected();

        if affected == 0 {
            if self.pull_requests_exists(pull_request_id).await? {
                return Err(DatabaseError::UnknownUser(old_user_id.into()));
            } else {
                return Err(DatabaseError::UnknownPullRequest(pull_request_id.into()));
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn statistics_assignment_counts(&self) -> Result<BTreeMap<String, u64>> {
        let rows = sqlx::query(
            r#"
            SELECT u.username, COUNT(r.user_id) AS assignments
            FROM users u
            LEFT JOIN pull_request_reviewers r ON r.user_id = u.user_id
            GROUP BY u.username
        "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        rows.into_iter()
            .map(|row| {
                let username: String = row.try_get("username")?;
                let assignments: i64 = row.try_get("assignments")?;
                Ok((username, assignments as u64))
            })
            .collect::<core::result::Result<_, sqlx::Error>>()
            .map_err(Self::wrap_error)
    }

    #[tracing::instrument(skip(self))]
    async fn statistics_pull_request_counts(&self) -> Result<PullRequestCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'OPEN') AS open,
                COUNT(*) FILTER (WHERE status = 'MERGED') AS merged
            FROM pull_requests
        "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(Self::wrap_error)?;

        let total: i64 = row.try_get("total").map_err(Self::wrap_error)?;
        let open: i64 = row.try_get("open").map_err(Self::wrap_error)?;
        let merged: i64 = row.try_get("merged").map_err(Self::wrap_error)?;

        Ok(PullRequestCounts {
            total: total as u64,
            open: open as u64,
            merged: merged as u64,
        })
    }
}
