use actix_web::{web, HttpResponse};
use prassign_core::use_cases::teams::{CreateTeamInterface, GetTeamInterface};
use prassign_models::Team;
use serde::Deserialize;
use shaku::HasComponent;

use super::require;
use crate::{server::AppContext, ApiError};

#[derive(Debug, Deserialize)]
pub(crate) struct TeamQuery {
    team_name: String,
}

#[tracing::instrument(skip_all, fields(team_name = %data.team_name))]
pub(crate) async fn create_team(
    ctx: web::Data<AppContext>,
    data: web::Json<Team>,
) -> Result<HttpResponse, ApiError> {
    require("team_name", &data.team_name)?;
    if data.members.is_empty() {
        return Err(ApiError::invalid_input("team must have at least one member"));
    }

    let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
    let team = create_team
        .run(&ctx.as_core_context(), data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = %query.team_name))]
pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse, ApiError> {
    require("team_name", &query.team_name)?;

    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get_team
        .run(&ctx.as_core_context(), &query.team_name)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "team": team })))
}
