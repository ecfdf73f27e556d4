use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;
use prassign_models::{PullRequest, PullRequestStatus, User};

use crate::{
    fixtures::{create_team, pull_request},
    testcase::db_test_case,
};

#[tokio::test]
async fn batch_upsert() {
    db_test_case("user_batch_upsert", |db| async move {
        let alice = User {
            user_id: "u1".into(),
            username: "alice".into(),
            team_name: "backend".into(),
            is_active: true,
        };
        db.users_batch_upsert(vec![alice.clone()]).await?;
        assert_eq!(db.users_get("u1").await?, Some(alice.clone()));

        let renamed = User {
            username: "alice-2".into(),
            ..alice
        };
        db.users_batch_upsert(vec![renamed.clone()]).await?;
        assert_eq!(db.users_get_expect("u1").await?, renamed);
        assert_eq!(db.users_list_by_team("backend").await?, vec![renamed]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("user_update", |db| async move {
        let ghost = User {
            user_id: "ghost".into(),
            ..Default::default()
        };
        assert!(matches!(
            db.users_update(ghost).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        create_team(&*db, "backend", &[("u1", true)]).await?;
        let mut user = db.users_get_expect("u1").await?;
        user.username = "bob".into();
        assert_eq!(db.users_update(user.clone()).await?, user);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_is_active() {
    db_test_case("user_set_is_active", |db| async move {
        assert!(matches!(
            db.users_set_is_active("u1", false).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        create_team(&*db, "backend", &[("u1", true)]).await?;
        assert!(!db.users_set_is_active("u1", false).await?.is_active);
        assert!(!db.users_get_expect("u1").await?.is_active);
        assert!(db.users_set_is_active("u1", true).await?.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_team() {
    db_test_case("user_deactivate_team", |db| async move {
        create_team(&*db, "backend", &[("u1", true), ("u2", true)]).await?;
        create_team(&*db, "frontend", &[("u3", true)]).await?;

        db.users_deactivate_team("backend").await?;

        let backend = db.users_list_by_team("backend").await?;
        assert!(backend.iter().all(|u| !u.is_active));
        assert!(db.users_get_expect("u3").await?.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_team_and_unassign() {
    db_test_case("user_deactivate_team_and_unassign", |db| async move {
        create_team(&*db, "backend", &[("a", true), ("b", true)]).await?;
        create_team(&*db, "frontend", &[("x", true), ("y", true)]).await?;
        db.pull_requests_create(pull_request("pr-1", "x", &["a", "y"], 0))
            .await?;
        db.pull_requests_create(pull_request("pr-2", "y", &["b"], 1))
            .await?;
        db.pull_requests_create(pull_request("pr-3", "x", &["y"], 2))
            .await?;
        db.pull_requests_create(pull_request("pr-4", "y", &["a", "x"], 3))
            .await?;
        let merged = db.pull_requests_get_expect("pr-4").await?;
        db.pull_requests_update(PullRequest {
            status: PullRequestStatus::Merged,
            merged_at: merged.created_at,
            ..merged
        })
        .await?;

        let member_ids = vec!["a".to_string(), "b".into()];
        let mut unassigned = db
            .users_deactivate_team_and_unassign(
                "backend",
                &["pr-1".to_string(), "pr-2".into(), "pr-4".into()],
                &member_ids,
            )
            .await?;
        unassigned.sort();

        assert_eq!(unassigned, vec!["pr-1".to_string(), "pr-2".into()]);
        assert_eq!(db.reviewers_list("pr-1").await?, vec!["y".to_string()]);
        assert_eq!(db.reviewers_list("pr-2").await?, Vec::<String>::new());
        assert_eq!(db.reviewers_list("pr-3").await?, vec!["y".to_string()]);
        // Merged pull requests keep their reviewers.
        assert_eq!(
            db.reviewers_list("pr-4").await?,
            vec!["a".to_string(), "x".into()]
        );
        assert!(!db.users_get_expect("a").await?.is_active);
        assert!(db.users_get_expect("x").await?.is_active);

        Ok(())
    })
    .await;
}
