use std::sync::Arc;
use tracing::info;

use crate::database::Store;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobPatch, JobSearch, JobStatus, JobView, NewJob};
use crate::models::session::RequestContext;
use crate::utils::validation::{non_blank, require_text, validate};

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn Store>,
}

fn parse_job_status(raw: Option<String>) -> Result<Option<JobStatus>> {
    non_blank(raw)
        .map(|s| s.parse::<JobStatus>())
        .transpose()
        .map_err(|e| Error::BadRequest(e.to_string()))
}

impl JobService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, ctx: &RequestContext, payload: CreateJobPayload) -> Result<Job> {
        let caller = ctx.require_privileged()?;
        validate(&payload)?;

        let job = NewJob {
            title: require_text(payload.title, "title")?,
            description: require_text(payload.description, "description")?,
            location: require_text(payload.location, "location")?,
            job_type: require_text(payload.job_type, "job_type")?,
            salary_range: non_blank(payload.salary_range),
            required_skills: non_blank(payload.required_skills),
            deadline: payload.deadline,
            status: parse_job_status(payload.status)?.unwrap_or(JobStatus::Active),
            created_by: caller.user_id,
        };
        let job = self.store.insert_job(job).await?;
        info!(job_id = job.id, created_by = caller.user_id, "job created");
        Ok(job)
    }

    pub async fn get(&self, id: i64) -> Result<JobView> {
        self.store
            .find_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        self.store.job_exists(id).await
    }

    /// Active jobs only, newest first.
    pub async fn list(&self, query: JobListQuery) -> Result<Vec<JobView>> {
        self.store
            .search_jobs(JobSearch {
                search: non_blank(query.search),
                location: non_blank(query.location),
                job_type: non_blank(query.job_type),
            })
            .await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        payload: UpdateJobPayload,
    ) -> Result<Job> {
        let caller = ctx.require_privileged()?;
        validate(&payload)?;

        let patch = JobPatch {
            title: payload.title,
            description: payload.description,
            location: payload.location,
            job_type: payload.job_type,
            salary_range: payload.salary_range,
            required_skills: payload.required_skills,
            deadline: payload.deadline,
            status: parse_job_status(payload.status)?,
        };
        let job = self
            .store
            .update_job(id, patch)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".into()))?;
        info!(job_id = id, updated_by = caller.user_id, "job updated");
        Ok(job)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        let caller = ctx.require_privileged()?;
        if !self.store.delete_job(id).await? {
            return Err(Error::NotFound("Job not found".into()));
        }
        info!(job_id = id, deleted_by = caller.user_id, "job deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::session::SessionIdentity;
    use crate::models::user::Role;

    fn ctx(role: Role) -> RequestContext {
        RequestContext::authenticated(SessionIdentity {
            user_id: 1,
            username: "hr".into(),
            role,
            full_name: "HR".into(),
        })
    }

    fn payload(title: &str, location: &str, job_type: &str) -> CreateJobPayload {
        CreateJobPayload {
            title: Some(title.into()),
            description: Some(format!("{} role", title)),
            location: Some(location.into()),
            job_type: Some(job_type.into()),
            required_skills: Some("Rust, SQL".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn candidates_cannot_post_jobs() {
        let jobs = JobService::new(Arc::new(MemoryStore::new()));
        let result = jobs
            .create(&ctx(Role::Candidate), payload("Dev", "Remote", "Full-time"))
            .await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));
    }

    #[tokio::test]
    async fn required_fields_are_enforced() {
        let jobs = JobService::new(Arc::new(MemoryStore::new()));
        let mut p = payload("Dev", "Remote", "Full-time");
        p.job_type = Some(String::new());
        assert!(matches!(
            jobs.create(&ctx(Role::Hr), p).await,
            Err(Error::MissingField(f)) if f == "job_type"
        ));
    }

    #[tokio::test]
    async fn search_filters_active_jobs() {
        let jobs = JobService::new(Arc::new(MemoryStore::new()));
        let hr = ctx(Role::Hr);
        jobs.create(&hr, payload("Backend Developer", "Berlin", "Full-time"))
            .await
            .unwrap();
        let closed = jobs
            .create(&hr, payload("Backend Intern", "Berlin", "Internship"))
            .await
            .unwrap();
        jobs.create(&hr, payload("Designer", "Paris", "Contract"))
            .await
            .unwrap();
        jobs.update(
            &hr,
            closed.id,
            UpdateJobPayload {
                status: Some("closed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let backend = jobs
            .list(JobListQuery {
                search: Some("backend".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend[0].job.title, "Backend Developer");

        let skills = jobs
            .list(JobListQuery {
                search: Some("sql".into()),
                location: Some("par".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].job.title, "Designer");

        let contract = jobs
            .list(JobListQuery {
                job_type: Some("Contract".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(contract.len(), 1);
    }

    #[tokio::test]
    async fn update_is_partial_and_delete_reports_missing() {
        let jobs = JobService::new(Arc::new(MemoryStore::new()));
        let hr = ctx(Role::Admin);
        let job = jobs
            .create(&hr, payload("Dev", "Remote", "Full-time"))
            .await
            .unwrap();

        let updated = jobs
            .update(
                &hr,
                job.id,
                UpdateJobPayload {
                    salary_range: Some("$1 - $2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Dev");
        assert_eq!(updated.salary_range.as_deref(), Some("$1 - $2"));

        jobs.delete(&hr, job.id).await.unwrap();
        assert!(matches!(jobs.delete(&hr, job.id).await, Err(Error::NotFound(_))));
        assert!(matches!(jobs.get(job.id).await, Err(Error::NotFound(_))));
    }
}
