use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::application::{
    Application, ApplicationStatus, ApplicationView, CandidateApplicationView, NewApplication,
    TransitionPolicy,
};
use crate::models::interview::{
    CandidateInterviewView, Interview, InterviewPatch, InterviewView, NewInterview,
};
use crate::models::job::{Job, JobPatch, JobSearch, JobView, NewJob};
use crate::models::session::{NewSession, Session, SessionIdentity};
use crate::models::user::{NewUser, User};

/// Persistence seam shared by every service.
///
/// Implementations must make the uniqueness rules atomic: a second
/// application for the same (job, candidate) pair fails with
/// `DuplicateApplication` and a second interview for the same application
/// fails with `AlreadyScheduled`, even when the calls race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `DuplicateUser` when the username or email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    /// Looks a user up by username or email.
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>>;

    async fn insert_session(&self, session: NewSession) -> Result<Session>;
    /// Resolves a token digest to its owner while the session is unexpired.
    async fn find_session_identity(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionIdentity>>;
    async fn delete_session(&self, token_hash: &str) -> Result<()>;
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64>;

    async fn insert_job(&self, job: NewJob) -> Result<Job>;
    async fn find_job(&self, id: i64) -> Result<Option<JobView>>;
    async fn job_exists(&self, id: i64) -> Result<bool>;
    /// Active jobs matching the filters, newest first.
    async fn search_jobs(&self, search: JobSearch) -> Result<Vec<JobView>>;
    async fn update_job(&self, id: i64, patch: JobPatch) -> Result<Option<Job>>;
    /// Removes the job with its applications and interviews.
    async fn delete_job(&self, id: i64) -> Result<bool>;

    /// Inserts in `applied` state. `NotFound` if the job is gone.
    async fn insert_application(&self, application: NewApplication) -> Result<Application>;
    async fn list_applications_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateApplicationView>>;
    async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<ApplicationView>>;
    /// `NotFound` for an unknown id; the policy decides whether the move is allowed.
    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
        policy: TransitionPolicy,
    ) -> Result<Application>;

    /// Inserts the interview and moves the application to `interviewed` as
    /// one unit of work.
    async fn schedule_interview(
        &self,
        interview: NewInterview,
        policy: TransitionPolicy,
    ) -> Result<(Interview, Application)>;
    async fn update_interview(&self, id: i64, patch: InterviewPatch) -> Result<Interview>;
    async fn list_interviews_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateInterviewView>>;
    async fn list_interviews(&self) -> Result<Vec<InterviewView>>;
}
