use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::{
    dto::interview_dto::{
        InterviewListResponse, InterviewResponse, ScheduleInterviewPayload,
        ScheduleInterviewResponse, UpdateInterviewPayload,
    },
    error::Result,
    extract::JsonBody,
    models::session::RequestContext,
    services::interview_service::InterviewListing,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/interviews",
    responses(
        (status = 200, description = "Own interviews for candidates, all interviews for HR"),
        (status = 401, description = "Not logged in")
    )
)]
#[axum::debug_handler]
pub async fn list_interviews(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response> {
    let response = match state.interview_service.list(&ctx).await? {
        InterviewListing::Candidate(interviews) => Json(InterviewListResponse {
            success: true,
            interviews,
        })
        .into_response(),
        InterviewListing::Staff(interviews) => Json(InterviewListResponse {
            success: true,
            interviews,
        })
        .into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/interviews/mine",
    responses(
        (status = 200, description = "The caller's interviews"),
        (status = 401, description = "Not logged in")
    )
)]
#[axum::debug_handler]
pub async fn my_interviews(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_for_candidate(&ctx).await?;
    Ok(Json(InterviewListResponse {
        success: true,
        interviews,
    }))
}

#[utoipa::path(
    post,
    path = "/api/interviews",
    request_body = ScheduleInterviewPayload,
    responses(
        (status = 201, description = "Interview scheduled", body = Json<ScheduleInterviewResponse>),
        (status = 400, description = "Missing field or bad date"),
        (status = 403, description = "Caller is not HR or admin"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Interview already scheduled")
    )
)]
#[axum::debug_handler]
pub async fn schedule_interview(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(payload): JsonBody<ScheduleInterviewPayload>,
) -> Result<impl IntoResponse> {
    let (interview, application) = state.interview_service.schedule(&ctx, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScheduleInterviewResponse {
            success: true,
            message: "Interview scheduled successfully".to_string(),
            interview,
            application,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/interviews/{id}",
    params(
        ("id" = i64, Path, description = "Interview ID")
    ),
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = Json<InterviewResponse>),
        (status = 403, description = "Caller is not HR or admin"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    let interview = state
        .interview_service
        .update(&ctx, Some(id), payload)
        .await?;
    Ok(Json(interview_updated(interview)))
}

/// Body form of the update: the id travels in the payload.
#[utoipa::path(
    put,
    path = "/api/interviews",
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = Json<InterviewResponse>),
        (status = 400, description = "Interview id missing"),
        (status = 404, description = "Interview not found")
    )
)]
#[axum::debug_handler]
pub async fn update_interview_by_body(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(payload): JsonBody<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.update(&ctx, None, payload).await?;
    Ok(Json(interview_updated(interview)))
}

fn interview_updated(interview: crate::models::interview::Interview) -> InterviewResponse {
    InterviewResponse {
        success: true,
        message: "Interview updated successfully".to_string(),
        interview,
    }
}
