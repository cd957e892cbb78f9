use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::{
        auth_dto::{CheckResponse, LoginPayload, LoginResponse, RegisterPayload, RegisterResponse},
        MessageResponse,
    },
    error::Result,
    extract::JsonBody,
    middleware::auth::bearer_token,
    models::session::RequestContext,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Candidate account created", body = Json<RegisterResponse>),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "Username or email already exists")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Session opened", body = Json<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginPayload>,
) -> Result<impl IntoResponse> {
    let issued = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token: issued.token,
        expires_at: issued.session.expires_at,
        user: issued.user.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session closed", body = Json<MessageResponse>)
    )
)]
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.auth_service.logout(token).await?;
    }
    Ok(Json(MessageResponse::ok("Logged out")))
}

#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Session status", body = Json<CheckResponse>)
    )
)]
#[axum::debug_handler]
pub async fn session_check(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.check(&ctx);
    Ok(Json(CheckResponse {
        success: true,
        authenticated: user.is_some(),
        user,
    }))
}
