use pretty_assertions::assert_eq;
use prassign_database_interface::DatabaseError;

use crate::{
    fixtures::{create_team, member},
    testcase::db_test_case,
};

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        assert!(!db.teams_exists("backend").await?);

        let team = create_team(&*db, "backend", &[("u2", false), ("u1", true)]).await?;
        assert_eq!(team.team_name, "backend");
        assert_eq!(team.members, vec![member("u1", true), member("u2", false)]);

        assert!(db.teams_exists("backend").await?);
        assert!(db.teams_create(team).await.is_err());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_moves_existing_users() {
    db_test_case("team_create_moves_users", |db| async move {
        create_team(&*db, "backend", &[("u1", true), ("u2", true)]).await?;
        create_team(&*db, "frontend", &[("u2", false)]).await?;

        let backend = db.teams_get_expect("backend").await?;
        assert_eq!(backend.members, vec![member("u1", true)]);

        let user = db.users_get_expect("u2").await?;
        assert_eq!(user.team_name, "frontend");
        assert!(!user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);
        assert!(matches!(
            db.teams_get_expect("backend").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        create_team(&*db, "backend", &[]).await?;
        let team = db.teams_get_expect("backend").await?;
        assert_eq!(team.members, vec![]);

        Ok(())
    })
    .await;
}
