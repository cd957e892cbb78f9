use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    #[serde(alias = "inactive")]
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "closed" | "inactive" => Ok(JobStatus::Closed),
            _ => Err(ParseEnumError::new("job status", s)),
        }
    }
}

impl TryFrom<String> for JobStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: Option<String>,
    pub required_skills: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job joined with its poster's name and how many applications it has.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub job: Job,
    pub created_by_name: Option<String>,
    pub application_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: Option<String>,
    pub required_skills: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: JobStatus,
    pub created_by: i64,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
    pub required_skills: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl JobSearch {
    /// In-process equivalent of the catalog's SQL filter.
    pub fn matches(&self, job: &Job) -> bool {
        if job.status != JobStatus::Active {
            return false;
        }
        if let Some(term) = self.search.as_deref().map(str::to_lowercase) {
            let hit = job.title.to_lowercase().contains(&term)
                || job.description.to_lowercase().contains(&term)
                || job
                    .required_skills
                    .as_deref()
                    .map(|s| s.to_lowercase().contains(&term))
                    .unwrap_or(false);
            if !hit {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref().map(str::to_lowercase) {
            if !job.location.to_lowercase().contains(&location) {
                return false;
            }
        }
        if let Some(job_type) = self.job_type.as_deref() {
            if job.job_type != job_type {
                return false;
            }
        }
        true
    }
}
