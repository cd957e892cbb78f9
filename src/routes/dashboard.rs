use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::dashboard_dto::DashboardResponse, error::Result, models::session::RequestContext,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Candidate or HR summary", body = Json<DashboardResponse>),
        (status = 401, description = "Not logged in")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let dashboard = state.dashboard_service.build(&ctx).await?;
    Ok(Json(DashboardResponse {
        success: true,
        dashboard,
    }))
}
