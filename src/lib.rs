pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::Store;
use crate::models::application::TransitionPolicy;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    dashboard_service::DashboardService, interview_service::InterviewService,
    job_service::JobService,
};

/// Knobs the services need at construction time.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub session_ttl_hours: i64,
    pub status_policy: TransitionPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
            status_policy: TransitionPolicy::Permissive,
        }
    }
}

impl From<&config::Config> for ServiceSettings {
    fn from(config: &config::Config) -> Self {
        Self {
            session_ttl_hours: config.session_ttl_hours,
            status_policy: config.status_policy,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, settings: ServiceSettings) -> Self {
        let auth_service = AuthService::new(store.clone(), settings.session_ttl_hours);
        let job_service = JobService::new(store.clone());
        let application_service = ApplicationService::new(store.clone(), settings.status_policy);
        let interview_service = InterviewService::new(store.clone(), settings.status_policy);
        let dashboard_service = DashboardService::new(store);

        Self {
            auth_service,
            job_service,
            application_service,
            interview_service,
            dashboard_service,
        }
    }
}
