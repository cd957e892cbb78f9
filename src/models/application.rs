use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use std::fmt;
use std::str::FromStr;

use super::interview::InterviewStatus;
use super::ParseEnumError;
use crate::error::{Error, Result};

/// Lifecycle of an application. `Applied` is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interviewed,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interviewed,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ApplicationStatus::Selected | ApplicationStatus::Rejected)
    }

    /// Moves to `to` if `policy` allows it.
    pub fn transition(self, to: ApplicationStatus, policy: TransitionPolicy) -> Result<Self> {
        if policy.allows(self, to) {
            Ok(to)
        } else {
            Err(Error::InvalidTransition {
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("application status", s))
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which status changes the ledger accepts. Every status write, including
/// the forced move to `interviewed` on scheduling, goes through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// `selected` and `rejected` can no longer be left.
    LockFinal,
}

impl TransitionPolicy {
    pub fn allows(&self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::LockFinal => !from.is_final() || from == to,
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "lock_final" => Ok(TransitionPolicy::LockFinal),
            _ => Err(ParseEnumError::new("transition policy", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub cover_letter: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub user_id: i64,
    pub cover_letter: String,
}

/// Interview columns attached to an application listing, if one exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub interview_date: Option<NaiveDateTime>,
    pub interview_location: Option<String>,
    pub interview_status: Option<InterviewStatus>,
}

impl<'r> FromRow<'r, PgRow> for InterviewSummary {
    fn from_row(row: &'r PgRow) -> std::result::Result<Self, sqlx::Error> {
        let interview_status = row
            .try_get::<Option<String>, _>("interview_status")?
            .map(|s| s.parse::<InterviewStatus>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "interview_status".to_string(),
                source: Box::new(e),
            })?;
        Ok(Self {
            interview_date: row.try_get("interview_date")?,
            interview_location: row.try_get("interview_location")?,
            interview_status,
        })
    }
}

/// A candidate's own application with the job it targets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateApplicationView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub application: Application,
    pub title: String,
    pub location: String,
    pub job_type: String,
    pub salary_range: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub interview: InterviewSummary,
}

/// Application as seen by HR: candidate contact details and job title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationView {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub application: Application,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub job_title: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub interview: InterviewSummary,
}
