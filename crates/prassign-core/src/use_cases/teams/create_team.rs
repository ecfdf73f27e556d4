use std::collections::HashSet;

use async_trait::async_trait;
use prassign_models::Team;
use shaku::{Component, Interface};
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamInterface)]
pub(crate) struct CreateTeam;

impl CreateTeam {
    fn validate(team: &Team) -> Result<()> {
        if team.team_name.trim().is_empty() {
            return Err(DomainError::invalid_input("team_name is required"));
        }

        if team.members.is_empty() {
            return Err(DomainError::invalid_input("members must not be empty"));
        }

        let mut seen = HashSet::new();
        for member in &team.members {
            if member.user_id.trim().is_empty() {
                return Err(DomainError::invalid_input("member user_id is required"));
            }

            if !seen.insert(member.user_id.as_str()) {
                return Err(DomainError::invalid_input(format!(
                    "duplicate member {}",
                    member.user_id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CreateTeamInterface for CreateTeam {
    #[tracing::instrument(skip(self, ctx), fields(team_name = %team.team_name), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team> {
        Self::validate(&team)?;

        if ctx.db_service.teams_exists(&team.team_name).await? {
            return Err(DomainError::TeamExists {
                team_name: team.team_name,
            });
        }

        let team = ctx.db_service.teams_create(team).await?;
        info!(
            team_name = %team.team_name,
            members_count = team.members.len(),
            message = "Team created"
        );

        Ok(team)
    }
}
