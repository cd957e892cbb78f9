use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::{Job, JobView};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateJobPayload {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 64))]
    pub job_type: Option<String>,
    #[validate(length(max = 128))]
    pub salary_range: Option<String>,
    pub required_skills: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub job_type: Option<String>,
    #[validate(length(max = 128))]
    pub salary_range: Option<String>,
    pub required_skills: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: JobView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreatedResponse {
    pub success: bool,
    pub message: String,
    pub job_id: i64,
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobView>,
}
