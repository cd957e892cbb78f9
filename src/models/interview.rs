use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterviewStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" | "canceled" => Ok(InterviewStatus::Cancelled),
            _ => Err(ParseEnumError::new("interview status", s)),
        }
    }
}

impl TryFrom<String> for InterviewStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: i64,
    pub application_id: i64,
    pub interview_date: NaiveDateTime,
    pub location: String,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: InterviewStatus,
    pub feedback: Option<String>,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub application_id: i64,
    pub interview_date: NaiveDateTime,
    pub location: String,
    pub notes: Option<String>,
}

/// Partial update: `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewPatch {
    pub interview_date: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: Option<InterviewStatus>,
    pub feedback: Option<String>,
    pub rating: Option<i32>,
}

impl InterviewPatch {
    pub fn is_empty(&self) -> bool {
        *self == InterviewPatch::default()
    }

    pub fn apply(self, interview: &mut Interview) {
        if let Some(date) = self.interview_date {
            interview.interview_date = date;
        }
        if let Some(location) = self.location {
            interview.location = location;
        }
        if let Some(notes) = self.notes {
            interview.notes = Some(notes);
        }
        if let Some(status) = self.status {
            interview.status = status;
        }
        if let Some(feedback) = self.feedback {
            interview.feedback = Some(feedback);
        }
        if let Some(rating) = self.rating {
            interview.rating = Some(rating);
        }
    }
}

/// Interview as shown to the candidate, with who posted the job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateInterviewView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub interview: Interview,
    pub job_id: i64,
    pub job_title: String,
    pub hr_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub interview: Interview,
    pub job_id: i64,
    pub job_title: String,
    pub candidate_name: String,
    pub candidate_email: String,
}
