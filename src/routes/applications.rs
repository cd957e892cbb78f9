use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationListResponse, ApplicationResponse,
        SubmitApplicationPayload, UpdateStatusPayload,
    },
    error::Result,
    extract::JsonBody,
    models::session::RequestContext,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("job_id" = Option<i64>, Query, description = "Only applications for this job")
    ),
    responses(
        (status = 200, description = "Applications with candidate details"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not HR or admin")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(&ctx, query.job_id).await?;
    Ok(Json(ApplicationListResponse {
        success: true,
        applications,
    }))
}

#[utoipa::path(
    get,
    path = "/api/applications/mine",
    responses(
        (status = 200, description = "The caller's applications"),
        (status = 401, description = "Not logged in")
    )
)]
#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_for_candidate(&ctx).await?;
    Ok(Json(ApplicationListResponse {
        success: true,
        applications,
    }))
}

/// Body form of submission: `{job_id, cover_letter}`.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "job_id missing"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(payload): JsonBody<SubmitApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .submit(&ctx, payload.job_id, payload.cover_letter)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            success: true,
            message: "Application submitted successfully".to_string(),
            application,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ApplicationResponse>),
        (status = 400, description = "Missing or unknown status"),
        (status = 403, description = "Caller is not HR or admin"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(&ctx, Some(id), payload.status)
        .await?;
    Ok(Json(status_updated(application)))
}

/// Body form of the status update: `{application_id, status}`.
#[utoipa::path(
    put,
    path = "/api/applications",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ApplicationResponse>),
        (status = 400, description = "Missing id or status"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status_by_body(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(payload): JsonBody<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(&ctx, payload.application_id, payload.status)
        .await?;
    Ok(Json(status_updated(application)))
}

fn status_updated(application: crate::models::application::Application) -> ApplicationResponse {
    ApplicationResponse {
        success: true,
        message: "Application status updated successfully".to_string(),
        application,
    }
}
