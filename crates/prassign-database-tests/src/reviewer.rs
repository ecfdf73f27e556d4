use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;

use crate::{
    fixtures::{create_team, pull_request},
    testcase::db_test_case,
};

#[tokio::test]
async fn assign() {
    db_test_case("reviewer_assign", |db| async move {
        assert!(matches!(
            db.reviewers_assign("pr-1", "b").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "a", &[], 0))
            .await?;

        db.reviewers_assign("pr-1", "c").await?;
        db.reviewers_assign("pr-1", "b").await?;
        db.reviewers_assign("pr-1", "c").await?;

        assert_eq!(
            db.reviewers_list("pr-1").await?,
            vec!["c".to_string(), "b".into()]
        );
        assert!(db.reviewers_is_assigned("pr-1", "b").await?);
        assert!(!db.reviewers_is_assigned("pr-1", "a").await?);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn remove() {
    db_test_case("reviewer_remove", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true), ("c", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "a", &["b", "c"], 0))
            .await?;

        assert!(db.reviewers_remove("pr-1", "b").await?);
        assert!(!db.reviewers_remove("pr-1", "b").await?);
        assert_eq!(db.reviewers_list("pr-1").await?, vec!["c".to_string()]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_keeps_position() {
    db_test_case("reviewer_replace", |db| async move {
        create_team(
            &*db,
            "backend",
            &[("a", true), ("b", true), ("c", true), ("d", true)],
        )
        .await?;
        db.pull_requests_create(pull_request("pr-1", "a", &["b", "c"], 0))
            .await?;

        db.reviewers_replace("pr-1", "b", "d").await?;
        assert_eq!(
            db.reviewers_list("pr-1").await?,
            vec!["d".to_string(), "c".into()]
        );

        assert!(matches!(
            db.reviewers_replace("pr-1", "b", "a").await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert!(matches!(
            db.reviewers_replace("pr-2", "b", "a").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));
        assert!(db.reviewers_replace("pr-1", "d", "c").await.is_err());
        assert_eq!(
            db.reviewers_list("pr-1").await?,
            vec!["d".to_string(), "c".into()]
        );

        Ok(())
    })
    .await;
}
