use actix_web::{web, HttpResponse};
use prassign_core::use_cases::users::{
    DeactivateTeamMembersInterface, ListUserReviewsInterface, SetUserIsActiveInterface,
};
use serde::Deserialize;
use shaku::HasComponent;

use super::require;
use crate::{metrics::TEAMS_DEACTIVATED, server::AppContext, ApiError};

#[derive(Debug, Deserialize)]
pub(crate) struct SetIsActiveJson {
    user_id: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeactivateTeamJson {
    team_name: String,
}

#[tracing::instrument(skip_all, fields(user_id = %data.user_id, is_active = data.is_active))]
pub(crate) async fn set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse, ApiError> {
    require("user_id", &data.user_id)?;

    let set_user_is_active: &dyn SetUserIsActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_is_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

#[tracing::instrument(skip_all, fields(user_id = %query.user_id))]
pub(crate) async fn get_review(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, ApiError> {
    require("user_id", &query.user_id)?;

    let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let pull_requests = list_user_reviews
        .run(&ctx.as_core_context(), &query.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": query.user_id,
        "pull_requests": pull_requests,
    })))
}

#[tracing::instrument(skip_all, fields(team_name = %data.team_name))]
pub(crate) async fn deactivate_team(
    ctx: web::Data<AppContext>,
    data: web::Json<DeactivateTeamJson>,
) -> Result<HttpResponse, ApiError> {
    require("team_name", &data.team_name)?;

    let deactivate_team_members: &dyn DeactivateTeamMembersInterface =
        ctx.core_module.resolve_ref();
    let affected = deactivate_team_members
        .run(&ctx.as_core_context(), &data.team_name)
        .await?;
    TEAMS_DEACTIVATED.inc();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "team_name": data.team_name,
        "affected_prs": affected,
        "message": "Team members deactivated successfully",
    })))
}
