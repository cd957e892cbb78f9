use std::sync::Arc;
use tracing::info;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationStatus, ApplicationView, CandidateApplicationView, NewApplication,
    TransitionPolicy,
};
use crate::models::session::RequestContext;
use crate::models::user::Role;
use crate::services::job_service::JobService;
use crate::utils::validation::{require, require_text};

/// Owns application records and their status changes.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Store>,
    jobs: JobService,
    policy: TransitionPolicy,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>, policy: TransitionPolicy) -> Self {
        Self {
            jobs: JobService::new(store.clone()),
            store,
            policy,
        }
    }

    pub async fn submit(
        &self,
        ctx: &RequestContext,
        job_id: Option<i64>,
        cover_letter: Option<String>,
    ) -> Result<Application> {
        let caller = ctx.require_role(Role::Candidate)?;
        let job_id = require(job_id, "job_id")?;

        if !self.jobs.exists(job_id).await? {
            return Err(Error::NotFound("Job not found".into()));
        }

        let application = self
            .store
            .insert_application(NewApplication {
                job_id,
                user_id: caller.user_id,
                cover_letter: cover_letter.unwrap_or_default(),
            })
            .await?;
        info!(
            application_id = application.id,
            job_id,
            user_id = caller.user_id,
            "application submitted"
        );
        Ok(application)
    }

    pub async fn list_for_candidate(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<CandidateApplicationView>> {
        let caller = ctx.require_session()?;
        self.store
            .list_applications_for_candidate(caller.user_id)
            .await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        job_id: Option<i64>,
    ) -> Result<Vec<ApplicationView>> {
        ctx.require_privileged()?;
        self.store.list_applications(job_id).await
    }

    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        application_id: Option<i64>,
        status: Option<String>,
    ) -> Result<Application> {
        let caller = ctx.require_privileged()?;
        let id = require(application_id, "application_id")?;
        let raw = require_text(status, "status")?;
        let status = raw
            .parse::<ApplicationStatus>()
            .map_err(|_| Error::InvalidStatus(raw.clone()))?;

        let application = self
            .store
            .set_application_status(id, status, self.policy)
            .await?;
        info!(
            application_id = id,
            status = %status,
            updated_by = caller.user_id,
            "application status updated"
        );
        Ok(application)
    }
}
