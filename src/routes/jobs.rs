use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::{
        application_dto::{ApplicationResponse, ApplyPayload},
        job_dto::{
            CreateJobPayload, JobCreatedResponse, JobListQuery, JobListResponse, JobResponse,
            JobUpdatedResponse, UpdateJobPayload,
        },
        MessageResponse,
    },
    error::Result,
    extract::JsonBody,
    models::session::RequestContext,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("search" = Option<String>, Query, description = "Matches title, description or skills"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("job_type" = Option<String>, Query, description = "Exact job type")
    ),
    responses(
        (status = 200, description = "Active jobs", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list(query).await?;
    Ok(Json(JobListResponse {
        success: true,
        jobs,
    }))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<JobCreatedResponse>),
        (status = 400, description = "Missing or malformed field"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not HR or admin")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(payload): JsonBody<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(&ctx, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(JobCreatedResponse {
            success: true,
            message: "Job created successfully".to_string(),
            job_id: job.id,
            job,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job details", body = Json<JobResponse>),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(JobResponse { success: true, job }))
}

#[utoipa::path(
    patch,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<JobUpdatedResponse>),
        (status = 403, description = "Caller is not HR or admin"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.update(&ctx, id, payload).await?;
    Ok(Json(JobUpdatedResponse {
        success: true,
        message: "Job updated successfully".to_string(),
        job,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted", body = Json<MessageResponse>),
        (status = 403, description = "Caller is not HR or admin"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(&ctx, id).await?;
    Ok(Json(MessageResponse::ok("Job deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application submitted", body = Json<ApplicationResponse>),
        (status = 400, description = "Body present but not valid JSON"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not a candidate"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Already applied")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let cover_letter = apply_cover_letter(&body)?;
    let application = state
        .application_service
        .submit(&ctx, Some(id), cover_letter)
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

/// An empty body applies without a cover letter; anything else must parse.
fn apply_cover_letter(body: &[u8]) -> Result<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let payload: ApplyPayload = serde_json::from_slice(body)?;
    Ok(payload.cover_letter)
}
