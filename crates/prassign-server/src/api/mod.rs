//! Review assignment API, mounted under `/api/v1`.

mod pulls;
mod statistics;
mod teams;
mod users;

use actix_web::web;

use crate::ApiError;

pub(crate) fn configure_api_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/team")
            .route("/add", web::post().to(teams::create_team))
            .route("/get", web::get().to(teams::get_team)),
    )
    .service(
        web::scope("/users")
            .route("/setIsActive", web::post().to(users::set_is_active))
            .route("/getReview", web::get().to(users::get_review))
            .route("/deactivateTeam", web::post().to(users::deactivate_team)),
    )
    .service(
        web::scope("/pullRequests")
            .route("/create", web::post().to(pulls::create_pull_request))
            .route("/merge", web::post().to(pulls::merge_pull_request))
            .route("/reassign", web::post().to(pulls::reassign_reviewer)),
    )
    .route("/statistics", web::get().to(statistics::get_statistics));
}

/// Reject blank identifiers before reaching the use cases.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::invalid_input(format!("{field} is required")))
    } else {
        Ok(())
    }
}
