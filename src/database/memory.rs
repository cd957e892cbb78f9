use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::store::Store;
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationStatus, ApplicationView, CandidateApplicationView, InterviewSummary,
    NewApplication, TransitionPolicy,
};
use crate::models::interview::{
    CandidateInterviewView, Interview, InterviewPatch, InterviewStatus, InterviewView,
    NewInterview,
};
use crate::models::job::{Job, JobPatch, JobSearch, JobView, NewJob};
use crate::models::session::{NewSession, Session, SessionIdentity};
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    sessions: Vec<Session>,
    jobs: BTreeMap<i64, Job>,
    applications: BTreeMap<i64, Application>,
    interviews: BTreeMap<i64, Interview>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn interview_for(&self, application_id: i64) -> Option<&Interview> {
        self.interviews
            .values()
            .find(|i| i.application_id == application_id)
    }

    fn summary_for(&self, application_id: i64) -> InterviewSummary {
        self.interview_for(application_id)
            .map(|i| InterviewSummary {
                interview_date: Some(i.interview_date),
                interview_location: Some(i.location.clone()),
                interview_status: Some(i.status),
            })
            .unwrap_or_default()
    }

    fn job_view(&self, job: &Job) -> JobView {
        JobView {
            job: job.clone(),
            created_by_name: self.users.get(&job.created_by).map(|u| u.full_name.clone()),
            application_count: self
                .applications
                .values()
                .filter(|a| a.job_id == job.id)
                .count() as i64,
        }
    }
}

/// Process-local store used by tests and by `DATABASE_URL=memory` runs.
/// Every operation runs under one lock, so check-then-insert is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

fn newest_first(a: &Application, b: &Application) -> std::cmp::Ordering {
    (b.applied_at, b.id).cmp(&(a.applied_at, a.id))
}

fn soonest_first(a: &Interview, b: &Interview) -> std::cmp::Ordering {
    (a.interview_date, a.id).cmp(&(b.interview_date, b.id))
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut t = self.tables()?;
        let taken = t
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(Error::DuplicateUser);
        }
        let id = t.allocate_id();
        let row = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            created_at: Utc::now(),
        };
        t.users.insert(id, row.clone());
        Ok(row)
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let t = self.tables()?;
        Ok(t
            .users
            .values()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session> {
        let mut t = self.tables()?;
        let row = Session {
            id: Uuid::new_v4(),
            user_id: session.user_id,
            token_hash: session.token_hash,
            created_at: Utc::now(),
            expires_at: session.expires_at,
        };
        t.sessions.push(row.clone());
        Ok(row)
    }

    async fn find_session_identity(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionIdentity>> {
        let t = self.tables()?;
        let identity = t
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && s.expires_at > now)
            .and_then(|s| t.users.get(&s.user_id))
            .map(|u| SessionIdentity {
                user_id: u.id,
                username: u.username.clone(),
                role: u.role,
                full_name: u.full_name.clone(),
            });
        Ok(identity)
    }

    async fn delete_session(&self, token_hash: &str) -> Result<()> {
        let mut t = self.tables()?;
        t.sessions.retain(|s| s.token_hash != token_hash);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut t = self.tables()?;
        let before = t.sessions.len();
        t.sessions.retain(|s| s.expires_at > now);
        Ok((before - t.sessions.len()) as u64)
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job> {
        let mut t = self.tables()?;
        let id = t.allocate_id();
        let now = Utc::now();
        let row = Job {
            id,
            title: job.title,
            description: job.description,
            location: job.location,
            job_type: job.job_type,
            salary_range: job.salary_range,
            required_skills: job.required_skills,
            deadline: job.deadline,
            status: job.status,
            created_by: job.created_by,
            created_at: now,
            updated_at: now,
        };
        t.jobs.insert(id, row.clone());
        Ok(row)
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobView>> {
        let t = self.tables()?;
        Ok(t.jobs.get(&id).map(|job| t.job_view(job)))
    }

    async fn job_exists(&self, id: i64) -> Result<bool> {
        Ok(self.tables()?.jobs.contains_key(&id))
    }

    async fn search_jobs(&self, search: JobSearch) -> Result<Vec<JobView>> {
        let t = self.tables()?;
        let mut jobs: Vec<&Job> = t.jobs.values().filter(|j| search.matches(j)).collect();
        jobs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(jobs.into_iter().map(|j| t.job_view(j)).collect())
    }

    async fn update_job(&self, id: i64, patch: JobPatch) -> Result<Option<Job>> {
        let mut t = self.tables()?;
        let Some(job) = t.jobs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.title {
            job.title = v;
        }
        if let Some(v) = patch.description {
            job.description = v;
        }
        if let Some(v) = patch.location {
            job.location = v;
        }
        if let Some(v) = patch.job_type {
            job.job_type = v;
        }
        if let Some(v) = patch.salary_range {
            job.salary_range = Some(v);
        }
        if let Some(v) = patch.required_skills {
            job.required_skills = Some(v);
        }
        if let Some(v) = patch.deadline {
            job.deadline = Some(v);
        }
        if let Some(v) = patch.status {
            job.status = v;
        }
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        let mut t = self.tables()?;
        if t.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        let orphaned: Vec<i64> = t
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .map(|a| a.id)
            .collect();
        t.applications.retain(|_, a| a.job_id != id);
        t.interviews
            .retain(|_, i| !orphaned.contains(&i.application_id));
        Ok(true)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application> {
        let mut t = self.tables()?;
        if !t.jobs.contains_key(&application.job_id) {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        let duplicate = t
            .applications
            .values()
            .any(|a| a.job_id == application.job_id && a.user_id == application.user_id);
        if duplicate {
            return Err(Error::DuplicateApplication);
        }
        let id = t.allocate_id();
        let now = Utc::now();
        let row = Application {
            id,
            job_id: application.job_id,
            user_id: application.user_id,
            cover_letter: application.cover_letter,
            status: ApplicationStatus::Applied,
            applied_at: now,
            updated_at: now,
        };
        t.applications.insert(id, row.clone());
        Ok(row)
    }

    async fn list_applications_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateApplicationView>> {
        let t = self.tables()?;
        let mut rows: Vec<&Application> = t
            .applications
            .values()
            .filter(|a| a.user_id == user_id)
            .collect();
        rows.sort_by(|a, b| newest_first(a, b));
        Ok(rows
            .into_iter()
            .filter_map(|a| {
                let job = t.jobs.get(&a.job_id)?;
                Some(CandidateApplicationView {
                    application: a.clone(),
                    title: job.title.clone(),
                    location: job.location.clone(),
                    job_type: job.job_type.clone(),
                    salary_range: job.salary_range.clone(),
                    interview: t.summary_for(a.id),
                })
            })
            .collect())
    }

    async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<ApplicationView>> {
        let t = self.tables()?;
        let mut rows: Vec<&Application> = t
            .applications
            .values()
            .filter(|a| job_id.map_or(true, |id| a.job_id == id))
            .collect();
        rows.sort_by(|a, b| newest_first(a, b));
        Ok(rows
            .into_iter()
            .filter_map(|a| {
                let job = t.jobs.get(&a.job_id)?;
                let user = t.users.get(&a.user_id)?;
                Some(ApplicationView {
                    application: a.clone(),
                    full_name: user.full_name.clone(),
                    email: user.email.clone(),
                    phone: user.phone.clone(),
                    job_title: job.title.clone(),
                    interview: t.summary_for(a.id),
                })
            })
            .collect())
    }

    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
        policy: TransitionPolicy,
    ) -> Result<Application> {
        let mut t = self.tables()?;
        let application = t
            .applications
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        application.status = application.status.transition(status, policy)?;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }

    async fn schedule_interview(
        &self,
        interview: NewInterview,
        policy: TransitionPolicy,
    ) -> Result<(Interview, Application)> {
        let mut t = self.tables()?;
        let current = t
            .applications
            .get(&interview.application_id)
            .map(|a| a.status)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        if t.interview_for(interview.application_id).is_some() {
            return Err(Error::AlreadyScheduled);
        }
        let next = current.transition(ApplicationStatus::Interviewed, policy)?;

        let id = t.allocate_id();
        let now = Utc::now();
        let created = Interview {
            id,
            application_id: interview.application_id,
            interview_date: interview.interview_date,
            location: interview.location,
            notes: interview.notes,
            status: InterviewStatus::Scheduled,
            feedback: None,
            rating: None,
            created_at: now,
            updated_at: now,
        };
        t.interviews.insert(id, created.clone());

        let application = t
            .applications
            .get_mut(&interview.application_id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        application.status = next;
        application.updated_at = now;
        Ok((created, application.clone()))
    }

    async fn update_interview(&self, id: i64, patch: InterviewPatch) -> Result<Interview> {
        let mut t = self.tables()?;
        let interview = t
            .interviews
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Interview not found".into()))?;
        patch.apply(interview);
        interview.updated_at = Utc::now();
        Ok(interview.clone())
    }

    async fn list_interviews_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateInterviewView>> {
        let t = self.tables()?;
        let mut rows: Vec<CandidateInterviewView> = t
            .interviews
            .values()
            .filter_map(|i| {
                let application = t.applications.get(&i.application_id)?;
                if application.user_id != user_id {
                    return None;
                }
                let job = t.jobs.get(&application.job_id)?;
                let poster = t.users.get(&job.created_by)?;
                Some(CandidateInterviewView {
                    interview: i.clone(),
                    job_id: job.id,
                    job_title: job.title.clone(),
                    hr_name: poster.full_name.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| soonest_first(&a.interview, &b.interview));
        Ok(rows)
    }

    async fn list_interviews(&self) -> Result<Vec<InterviewView>> {
        let t = self.tables()?;
        let mut rows: Vec<InterviewView> = t
            .interviews
            .values()
            .filter_map(|i| {
                let application = t.applications.get(&i.application_id)?;
                let job = t.jobs.get(&application.job_id)?;
                let candidate = t.users.get(&application.user_id)?;
                Some(InterviewView {
                    interview: i.clone(),
                    job_id: job.id,
                    job_title: job.title.clone(),
                    candidate_name: candidate.full_name.clone(),
                    candidate_email: candidate.email.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| soonest_first(&a.interview, &b.interview));
        Ok(rows)
    }
}
