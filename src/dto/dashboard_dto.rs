use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::application::{ApplicationView, CandidateApplicationView};
use crate::models::interview::{CandidateInterviewView, InterviewView};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateStats {
    pub total_applications: i64,
    pub by_status: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HrStats {
    pub total_jobs: i64,
    pub total_applications: i64,
    pub by_status: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularJob {
    pub id: i64,
    pub title: String,
    pub application_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDashboard {
    pub stats: CandidateStats,
    pub recent_applications: Vec<CandidateApplicationView>,
    pub upcoming_interviews: Vec<CandidateInterviewView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrDashboard {
    pub stats: HrStats,
    pub recent_applications: Vec<ApplicationView>,
    pub upcoming_interviews: Vec<InterviewView>,
    pub popular_jobs: Vec<PopularJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard {
    Candidate(CandidateDashboard),
    Hr(HrDashboard),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}
