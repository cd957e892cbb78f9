use std::collections::BTreeMap;
use std::sync::Arc;

use crate::database::Store;
use crate::dto::dashboard_dto::{
    CandidateDashboard, CandidateStats, Dashboard, HrDashboard, HrStats, PopularJob,
};
use crate::error::Result;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::interview::{Interview, InterviewStatus};
use crate::models::job::JobSearch;
use crate::models::session::RequestContext;
use crate::models::user::Role;
use crate::utils::time::now;

const CANDIDATE_RECENT: usize = 5;
const HR_RECENT: usize = 10;
const HR_UPCOMING: usize = 10;
const POPULAR_JOBS: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn Store>,
}

/// Counts per status, with every status present even at zero.
fn count_by_status<'a>(rows: impl Iterator<Item = &'a Application>) -> BTreeMap<String, i64> {
    let mut counts: BTreeMap<String, i64> = ApplicationStatus::ALL
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    for application in rows {
        *counts.entry(application.status.to_string()).or_insert(0) += 1;
    }
    counts
}

fn is_upcoming(interview: &Interview) -> bool {
    interview.status == InterviewStatus::Scheduled && interview.interview_date > now().naive_utc()
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn build(&self, ctx: &RequestContext) -> Result<Dashboard> {
        let caller = ctx.require_session()?;
        match caller.role {
            Role::Candidate => self.candidate(caller.user_id).await.map(Dashboard::Candidate),
            Role::Hr | Role::Admin => self.hr().await.map(Dashboard::Hr),
        }
    }

    async fn candidate(&self, user_id: i64) -> Result<CandidateDashboard> {
        let applications = self.store.list_applications_for_candidate(user_id).await?;
        let interviews = self.store.list_interviews_for_candidate(user_id).await?;

        let stats = CandidateStats {
            total_applications: applications.len() as i64,
            by_status: count_by_status(applications.iter().map(|a| &a.application)),
        };
        Ok(CandidateDashboard {
            stats,
            recent_applications: applications.into_iter().take(CANDIDATE_RECENT).collect(),
            upcoming_interviews: interviews
                .into_iter()
                .filter(|i| is_upcoming(&i.interview))
                .collect(),
        })
    }

    async fn hr(&self) -> Result<HrDashboard> {
        let jobs = self.store.search_jobs(JobSearch::default()).await?;
        let applications = self.store.list_applications(None).await?;
        let interviews = self.store.list_interviews().await?;

        let stats = HrStats {
            total_jobs: jobs.len() as i64,
            total_applications: applications.len() as i64,
            by_status: count_by_status(applications.iter().map(|a| &a.application)),
        };

        let mut popular: Vec<PopularJob> = jobs
            .into_iter()
            .map(|j| PopularJob {
                id: j.job.id,
                title: j.job.title,
                application_count: j.application_count,
            })
            .collect();
        // Stable sort keeps newest-first among ties.
        popular.sort_by(|a, b| b.application_count.cmp(&a.application_count));
        popular.truncate(POPULAR_JOBS);

        Ok(HrDashboard {
            stats,
            recent_applications: applications.into_iter().take(HR_RECENT).collect(),
            upcoming_interviews: interviews
                .into_iter()
                .filter(|i| is_upcoming(&i.interview))
                .take(HR_UPCOMING)
                .collect(),
            popular_jobs: popular,
        })
    }
}
