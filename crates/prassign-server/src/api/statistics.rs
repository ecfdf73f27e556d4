use actix_web::{web, HttpResponse};
use prassign_core::use_cases::statistics::GetStatisticsInterface;
use shaku::HasComponent;

use crate::{server::AppContext, ApiError};

#[tracing::instrument(skip_all)]
pub(crate) async fn get_statistics(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let get_statistics: &dyn GetStatisticsInterface = ctx.core_module.resolve_ref();
    let statistics = get_statistics.run(&ctx.as_core_context()).await?;

    Ok(HttpResponse::Ok().json(statistics))
}
