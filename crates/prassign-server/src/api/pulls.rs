use actix_web::{web, HttpResponse};
use prassign_core::use_cases::pulls::{
    CreatePullRequestInterface, MergePullRequestInterface, ReassignReviewerInterface,
};
use serde::Deserialize;
use shaku::HasComponent;

use super::require;
use crate::{
    metrics::{PULL_REQUESTS_CREATED, PULL_REQUESTS_MERGED, REVIEWERS_REASSIGNED},
    server::AppContext,
    ApiError,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MergePullRequestJson {
    pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReassignReviewerJson {
    pull_request_id: String,
    old_user_id: String,
}

#[tracing::instrument(skip_all, fields(pull_request_id = %data.pull_request_id, author_id = %data.author_id))]
pub(crate) async fn create_pull_request(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse, ApiError> {
    require("pull_request_id", &data.pull_request_id)?;
    require("pull_request_name", &data.pull_request_name)?;
    require("author_id", &data.author_id)?;

    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;
    PULL_REQUESTS_CREATED.inc();

    Ok(HttpResponse::Created().json(serde_json::json!({ "pr": pull_request })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = %data.pull_request_id))]
pub(crate) async fn merge_pull_request(
    ctx: web::Data<AppContext>,
    data: web::Json<MergePullRequestJson>,
) -> Result<HttpResponse, ApiError> {
    require("pull_request_id", &data.pull_request_id)?;

    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pull_request = merge_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id)
        .await?;
    PULL_REQUESTS_MERGED.inc();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pr": pull_request })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = %data.pull_request_id, old_user_id = %data.old_user_id))]
pub(crate) async fn reassign_reviewer(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignReviewerJson>,
) -> Result<HttpResponse, ApiError> {
    require("pull_request_id", &data.pull_request_id)?;
    require("old_user_id", &data.old_user_id)?;

    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let reassignment = reassign_reviewer
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.old_user_id,
        )
        .await?;
    REVIEWERS_REASSIGNED.inc();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "pr": reassignment.pull_request,
        "replaced_by": reassignment.replaced_by,
    })))
}
