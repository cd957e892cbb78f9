use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::store::Store;
use crate::error::{Error, Result};
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

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, phone, role, created_at";

const JOB_VIEW_SELECT: &str = r#"
    SELECT j.*, u.full_name AS created_by_name,
           (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id) AS application_count
    FROM jobs j
    LEFT JOIN users u ON j.created_by = u.id
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("migration failed: {}", e)))?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Substring pattern for `ILIKE ... ESCAPE '\'` that treats `%` and `_`
/// in user input literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, full_name, phone, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::DuplicateUser
                } else {
                    e.into()
                }
            })
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE username = $1 OR email = $1",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session> {
        let row = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(session.user_id)
        .bind(&session.token_hash)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_session_identity(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionIdentity>> {
        let identity = sqlx::query_as::<_, SessionIdentity>(
            r#"
            SELECT u.id AS user_id, u.username, u.role, u.full_name
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(identity)
    }

    async fn delete_session(&self, token_hash: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job> {
        let row = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title, description, location, job_type, salary_range,
                required_skills, deadline, status, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.salary_range)
        .bind(&job.required_skills)
        .bind(job.deadline)
        .bind(job.status.as_str())
        .bind(job.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobView>> {
        let sql = format!("{} WHERE j.id = $1", JOB_VIEW_SELECT);
        let job = sqlx::query_as::<_, JobView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn job_exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jobs WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn search_jobs(&self, search: JobSearch) -> Result<Vec<JobView>> {
        let mut filters = vec!["j.status = 'active'".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(term) = search.search {
            let n = args.len() + 1;
            filters.push(format!(
                "(j.title ILIKE ${n} ESCAPE '\\' OR j.description ILIKE ${n} ESCAPE '\\' \
                 OR j.required_skills ILIKE ${n} ESCAPE '\\')"
            ));
            args.push(like_pattern(&term));
        }
        if let Some(location) = search.location {
            filters.push(format!("j.location ILIKE ${} ESCAPE '\\'", args.len() + 1));
            args.push(like_pattern(&location));
        }
        if let Some(job_type) = search.job_type {
            filters.push(format!("j.job_type = ${}", args.len() + 1));
            args.push(job_type);
        }

        let sql = format!(
            "{} WHERE {} ORDER BY j.created_at DESC, j.id DESC",
            JOB_VIEW_SELECT,
            filters.join(" AND ")
        );

        let mut statement = sqlx::query_as::<_, JobView>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let items = statement.fetch_all(&self.pool).await?;
        Ok(items)
    }

    async fn update_job(&self, id: i64, patch: JobPatch) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                job_type = COALESCE($5, job_type),
                salary_range = COALESCE($6, salary_range),
                required_skills = COALESCE($7, required_skills),
                deadline = COALESCE($8, deadline),
                status = COALESCE($9, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.location)
        .bind(patch.job_type)
        .bind(patch.salary_range)
        .bind(patch.required_skills)
        .bind(patch.deadline)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn delete_job(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application> {
        let inserted = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, user_id, cover_letter)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id, user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(application.job_id)
        .bind(application.user_id)
        .bind(&application.cover_letter)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                Error::NotFound("Job not found".to_string())
            } else {
                e.into()
            }
        })?;

        inserted.ok_or(Error::DuplicateApplication)
    }

    async fn list_applications_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateApplicationView>> {
        let items = sqlx::query_as::<_, CandidateApplicationView>(
            r#"
            SELECT a.*, j.title, j.location, j.job_type, j.salary_range,
                   i.interview_date, i.location AS interview_location, i.status AS interview_status
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            LEFT JOIN interviews i ON a.id = i.application_id
            WHERE a.user_id = $1
            ORDER BY a.applied_at DESC, a.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_applications(&self, job_id: Option<i64>) -> Result<Vec<ApplicationView>> {
        let items = sqlx::query_as::<_, ApplicationView>(
            r#"
            SELECT a.*, u.full_name, u.email, u.phone, j.title AS job_title,
                   i.interview_date, i.location AS interview_location, i.status AS interview_status
            FROM applications a
            JOIN users u ON a.user_id = u.id
            JOIN jobs j ON a.job_id = j.id
            LEFT JOIN interviews i ON a.id = i.application_id
            WHERE ($1::BIGINT IS NULL OR a.job_id = $1)
            ORDER BY a.applied_at DESC, a.id DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn set_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
        policy: TransitionPolicy,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM applications WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let current = current.ok_or_else(|| Error::NotFound("Application not found".into()))?;
        let current: ApplicationStatus = current
            .parse()
            .map_err(|e| Error::Internal(format!("corrupt application status: {}", e)))?;
        let next = current.transition(status, policy)?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    async fn schedule_interview(
        &self,
        interview: NewInterview,
        policy: TransitionPolicy,
    ) -> Result<(Interview, Application)> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM applications WHERE id = $1 FOR UPDATE")
                .bind(interview.application_id)
                .fetch_optional(&mut *tx)
                .await?;
        let current = current.ok_or_else(|| Error::NotFound("Application not found".into()))?;

        let created = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (application_id, interview_date, location, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (application_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(interview.application_id)
        .bind(interview.interview_date)
        .bind(&interview.location)
        .bind(&interview.notes)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::AlreadyScheduled)?;

        let current: ApplicationStatus = current
            .parse()
            .map_err(|e| Error::Internal(format!("corrupt application status: {}", e)))?;
        let next = current.transition(ApplicationStatus::Interviewed, policy)?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(interview.application_id)
        .bind(next.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created, application))
    }

    async fn update_interview(&self, id: i64, patch: InterviewPatch) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews
            SET
                interview_date = COALESCE($2, interview_date),
                location = COALESCE($3, location),
                notes = COALESCE($4, notes),
                status = COALESCE($5, status),
                feedback = COALESCE($6, feedback),
                rating = COALESCE($7, rating),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.interview_date)
        .bind(patch.location)
        .bind(patch.notes)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.feedback)
        .bind(patch.rating)
        .fetch_optional(&self.pool)
        .await?;

        interview.ok_or_else(|| Error::NotFound("Interview not found".into()))
    }

    async fn list_interviews_for_candidate(
        &self,
        user_id: i64,
    ) -> Result<Vec<CandidateInterviewView>> {
        let items = sqlx::query_as::<_, CandidateInterviewView>(
            r#"
            SELECT i.*, a.job_id, j.title AS job_title, u.full_name AS hr_name
            FROM interviews i
            JOIN applications a ON i.application_id = a.id
            JOIN jobs j ON a.job_id = j.id
            JOIN users u ON j.created_by = u.id
            WHERE a.user_id = $1
            ORDER BY i.interview_date ASC, i.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn list_interviews(&self) -> Result<Vec<InterviewView>> {
        let items = sqlx::query_as::<_, InterviewView>(
            r#"
            SELECT i.*, a.job_id, j.title AS job_title,
                   u.full_name AS candidate_name, u.email AS candidate_email
            FROM interviews i
            JOIN applications a ON i.application_id = a.id
            JOIN jobs j ON a.job_id = j.id
            JOIN users u ON a.user_id = u.id
            ORDER BY i.interview_date ASC, i.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern(r"c:\dir"), r"%c:\\dir%");
    }
}
