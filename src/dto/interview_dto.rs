use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::Application;
use crate::models::interview::Interview;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScheduleInterviewPayload {
    pub application_id: Option<i64>,
    pub interview_date: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Every field is optional; only the ones present change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateInterviewPayload {
    pub id: Option<i64>,
    pub interview_date: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub feedback: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInterviewResponse {
    pub success: bool,
    pub message: String,
    pub interview: Interview,
    pub application: Application,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub success: bool,
    pub message: String,
    pub interview: Interview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewListResponse<T> {
    pub success: bool,
    pub interviews: Vec<T>,
}
