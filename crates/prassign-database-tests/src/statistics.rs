use maplit::btreemap;
use pretty_assertions::assert_eq;
use prassign_models::{PullRequest, PullRequestCounts, PullRequestStatus};

use crate::{
    fixtures::{create_team, pull_request},
    testcase::db_test_case,
};

#[tokio::test]
async fn empty() {
    db_test_case("statistics_empty", |db| async move {
        assert_eq!(db.statistics_assignment_counts().await?, btreemap! {});
        assert_eq!(
            db.statistics_pull_request_counts().await?,
            PullRequestCounts::default()
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn counts() {
    db_test_case("statistics_counts", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "a", &["b", "c"], 0))
            .await?;
        let merged = db
            .pull_requests_create(pull_request("pr-2", "a", &["b"], 1))
            .await?;
        db.pull_requests_update(PullRequest {
            status: PullRequestStatus::Merged,
            merged_at: merged.created_at,
            ..merged
        })
        .await?;

        assert_eq!(
            db.statistics_assignment_counts().await?,
            btreemap! {
                "user-a".to_string() => 0,
                "user-b".to_string() => 2,
                "user-c".to_string() => 1,
            }
        );
        assert_eq!(
            db.statistics_pull_request_counts().await?,
            PullRequestCounts {
                total: 2,
                open: 1,
                merged: 1,
            }
        );

        Ok(())
    })
    .await;
}
