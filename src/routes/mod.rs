pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod interviews;
pub mod jobs;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::middleware::{
    auth::resolve_session,
    rate_limit::{new_rps_state, rps_middleware},
};
use crate::AppState;

/// Assembles every route. Account endpoints share the public limit, the
/// rest of the API shares the API limit; both resolve the caller's session.
pub fn app(state: AppState, public_rps: u32, api_rps: u32) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let public_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/check", get(auth::session_check))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            resolve_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(public_rps),
            rps_middleware,
        ));

    let api = Router::new()
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/api/jobs/:id/apply", post(jobs::apply_to_job))
        .route(
            "/api/applications",
            get(applications::list_applications)
                .post(applications::submit_application)
                .put(applications::update_status_by_body),
        )
        .route("/api/applications/mine", get(applications::my_applications))
        .route(
            "/api/applications/:id/status",
            patch(applications::update_application_status),
        )
        .route(
            "/api/interviews",
            get(interviews::list_interviews)
                .post(interviews::schedule_interview)
                .put(interviews::update_interview_by_body),
        )
        .route("/api/interviews/mine", get(interviews::my_interviews))
        .route("/api/interviews/:id", patch(interviews::update_interview))
        .route("/api/dashboard", get(dashboard::dashboard))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            resolve_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            new_rps_state(api_rps),
            rps_middleware,
        ));

    base_routes.merge(public_api).merge(api).with_state(state)
}
