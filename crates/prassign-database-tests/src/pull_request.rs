use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;
use prassign_models::{PullRequest, PullRequestStatus};
use time::{Duration, OffsetDateTime};

use crate::{
    fixtures::{create_team, pull_request},
    testcase::db_test_case,
};

fn ids(values: &[PullRequest]) -> Vec<&str> {
    values.iter().map(|p| p.pull_request_id.as_str()).collect()
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;

        let expected = pull_request("pr-1", "a", &["c", "b"], 0);
        let pr = db.pull_requests_create(expected.clone()).await?;
        assert_eq!(pr, expected);
        assert_eq!(db.pull_requests_get_expect("pr-1").await?, expected);
        assert!(db.pull_requests_exists("pr-1").await?);

        assert!(db
            .pull_requests_create(pull_request("pr-1", "a", &[], 1))
            .await
            .is_err());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get_unknown() {
    db_test_case("pull_request_get_unknown", |db| async move {
        assert_eq!(db.pull_requests_get("pr-1").await?, None);
        assert!(!db.pull_requests_exists("pr-1").await?);
        assert!(matches!(
            db.pull_requests_get_expect("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("pull_request_update", |db| async move {
        assert!(matches!(
            db.pull_requests_update(pull_request("pr-1", "a", &[], 0))
                .await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_team(&*db, "backend", &[("a", true), ("b", true)]).await?;
        let created = db
            .pull_requests_create(pull_request("pr-1", "a", &["b"], 0))
            .await?;

        let merged_at = OffsetDateTime::UNIX_EPOCH + Duration::days(20_001);
        let updated = db
            .pull_requests_update(PullRequest {
                status: PullRequestStatus::Merged,
                merged_at: Some(merged_at),
                assigned_reviewers: vec![],
                ..created.clone()
            })
            .await?;

        assert_eq!(updated.status, PullRequestStatus::Merged);
        assert_eq!(updated.merged_at, Some(merged_at));
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.assigned_reviewers, vec!["b".to_string()]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_reviewer() {
    db_test_case("pull_request_list_by_reviewer", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "a", &["b"], 0))
            .await?;
        db.pull_requests_create(pull_request("pr-2", "a", &["c"], 1))
            .await?;
        db.pull_requests_create(pull_request("pr-3", "c", &["b", "a"], 2))
            .await?;

        let values = db.pull_requests_list_by_reviewer("b").await?;
        assert_eq!(ids(&values), vec!["pr-3", "pr-1"]);
        assert_eq!(values[0].assigned_reviewers, vec!["b".to_string(), "a".into()]);
        assert_eq!(db.pull_requests_list_by_reviewer("z").await?, vec![]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_open_by_reviewers() {
    db_test_case("pull_request_list_open_by_reviewers", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "a", &["b"], 0))
            .await?;
        db.pull_requests_create(pull_request("pr-2", "a", &["c"], 1))
            .await?;
        let merged = db
            .pull_requests_create(pull_request("pr-3", "a", &["b", "c"], 2))
            .await?;
        db.pull_requests_update(PullRequest {
            status: PullRequestStatus::Merged,
            merged_at: merged.created_at,
            ..merged
        })
        .await?;

        let values = db
            .pull_requests_list_open_by_reviewers(&["b".to_string(), "c".into()])
            .await?;
        assert_eq!(ids(&values), vec!["pr-2", "pr-1"]);
        assert_eq!(db.pull_requests_list_open_by_reviewers(&[]).await?, vec![]);

        Ok(())
    })
    .await;
}
