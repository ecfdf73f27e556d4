use async_trait::async_trait;
use prassign_models::User;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetUserIsActiveInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool)
        -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = SetUserIsActiveInterface)]
pub(crate) struct SetUserIsActive;

#[async_trait]
impl SetUserIsActiveInterface for SetUserIsActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
        is_active: bool,
    ) -> Result<User> {
        Ok(ctx.db_service.users_set_is_active(user_id, is_active).await?)
    }
}
