use async_trait::async_trait;
use prassign_models::User;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SelectReviewersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, author: &User) -> Result<Vec<String>>;
}

/// Pick up to `reviewers.count` distinct reviewers among the active members
/// of the author's team, author excluded.
///
/// Candidates are shuffled uniformly then truncated, so fewer candidates than
/// wanted simply yield fewer reviewers.
#[derive(Component)]
#[shaku(interface = SelectReviewersInterface)]
pub(crate) struct SelectReviewers;

#[async_trait]
impl SelectReviewersInterface for SelectReviewers {
    #[tracing::instrument(skip(self, ctx), fields(author_id = %author.user_id), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, author: &User) -> Result<Vec<String>> {
        let mut candidates: Vec<String> = ctx
            .db_service
            .users_list_by_team(&author.team_name)
            .await?
            .into_iter()
            .filter(|u| u.is_active && u.user_id != author.user_id)
            .map(|u| u.user_id)
            .collect();

        let candidates_count = candidates.len();
        ctx.random_service.shuffle(&mut candidates);
        candidates.truncate(ctx.config.reviewers.count);

        info!(
            team_name = %author.team_name,
            candidates_count = candidates_count,
            selected = ?candidates,
            message = "Selected reviewers"
        );

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use prassign_database_interface::DbService;

    use super::*;
    use crate::{context::tests::CoreContextTest, random::MockRandomService};

    fn user(user_id: &str, is_active: bool) -> User {
        User {
            user_id: user_id.into(),
            username: user_id.to_uppercase(),
            team_name: "backend".into(),
            is_active,
        }
    }

    async fn setup(ctx: &CoreContextTest, users: Vec<User>) {
        ctx.db_service.users_batch_upsert(users).await.unwrap();
    }

    #[tokio::test]
    async fn two_distinct_eligible_reviewers() {
        let ctx = CoreContextTest::new();
        setup(
            &ctx,
            vec![
                user("a", true),
                user("b", true),
                user("c", true),
                user("d", true),
                user("e", false),
            ],
        )
        .await;

        for _ in 0..50 {
            let selected = SelectReviewers
                .run(&ctx.as_context(), &user("a", true))
                .await
                .unwrap();

            let unique: BTreeSet<_> = selected.iter().cloned().collect();
            assert_eq!(selected.len(), 2);
            assert_eq!(unique.len(), 2);
            assert!(!unique.contains("a"));
            assert!(!unique.contains("e"));
        }
    }

    #[tokio::test]
    async fn every_candidate_gets_picked() {
        let ctx = CoreContextTest::new();
        setup(
            &ctx,
            vec![user("a", true), user("b", true), user("c", true), user("d", true)],
        )
        .await;

        let mut seen = BTreeSet::new();
        for _ in 0..50 {
            seen.extend(
                SelectReviewers
                    .run(&ctx.as_context(), &user("a", true))
                    .await
                    .unwrap(),
            );
        }

        assert_eq!(
            seen,
            ["b", "c", "d"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<_>>()
        );
    }

    #[tokio::test]
    async fn fewer_candidates() {
        let ctx = CoreContextTest::new();
        setup(&ctx, vec![user("a", true), user("b", true), user("c", false)]).await;

        let selected = SelectReviewers
            .run(&ctx.as_context(), &user("a", true))
            .await
            .unwrap();
        assert_eq!(selected, vec!["b".to_string()]);

        ctx.db_service.users_set_is_active("b", false).await.unwrap();
        let selected = SelectReviewers
            .run(&ctx.as_context(), &user("a", true))
            .await
            .unwrap();
        assert_eq!(selected, Vec::<String>::new());
    }

    #[tokio::test]
    async fn keeps_shuffled_order() {
        let mut ctx = CoreContextTest::new();
        setup(
            &ctx,
            vec![user("a", true), user("b", true), user("c", true), user("d", true)],
        )
        .await;

        let mut random_service = MockRandomService::new();
        random_service
            .expect_shuffle()
            .once()
            .returning(|values| values.reverse());
        ctx.random_service = Box::new(random_service);

        let selected = SelectReviewers
            .run(&ctx.as_context(), &user("a", true))
            .await
            .unwrap();
        assert_eq!(selected, vec!["d".to_string(), "c".into()]);
    }
}
