use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::database::Store;
use crate::dto::interview_dto::{ScheduleInterviewPayload, UpdateInterviewPayload};
use crate::error::{Error, Result};
use crate::models::application::{Application, TransitionPolicy};
use crate::models::interview::{
    CandidateInterviewView, Interview, InterviewPatch, InterviewStatus, InterviewView,
    NewInterview,
};
use crate::models::session::RequestContext;
use crate::models::user::Role;
use crate::utils::time::parse_interview_date;
use crate::utils::validation::{non_blank, require, require_text, validate};

/// Owns interview records and forces the linked application to
/// `interviewed` when one is booked.
#[derive(Clone)]
pub struct InterviewService {
    store: Arc<dyn Store>,
    policy: TransitionPolicy,
}

/// Interview listing shaped by the caller's role.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InterviewListing {
    Candidate(Vec<CandidateInterviewView>),
    Staff(Vec<InterviewView>),
}

impl InterviewService {
    pub fn new(store: Arc<dyn Store>, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn schedule(
        &self,
        ctx: &RequestContext,
        payload: ScheduleInterviewPayload,
    ) -> Result<(Interview, Application)> {
        let caller = ctx.require_privileged()?;
        validate(&payload)?;

        let application_id = require(payload.application_id, "application_id")?;
        let raw_date = require_text(payload.interview_date, "interview_date")?;
        let location = require_text(payload.location, "location")?;
        let interview_date = parse_interview_date(&raw_date)?;

        let (interview, application) = self
            .store
            .schedule_interview(
                NewInterview {
                    application_id,
                    interview_date,
                    location,
                    notes: non_blank(payload.notes),
                },
                self.policy,
            )
            .await?;
        info!(
            interview_id = interview.id,
            application_id,
            scheduled_by = caller.user_id,
            "interview scheduled"
        );
        Ok((interview, application))
    }

    /// Applies only the fields present in the payload.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Option<i64>,
        payload: UpdateInterviewPayload,
    ) -> Result<Interview> {
        let caller = ctx.require_privileged()?;
        let id = require(id.or(payload.id), "id")?;
        validate(&payload)?;

        let status = non_blank(payload.status)
            .map(|raw| {
                raw.parse::<InterviewStatus>()
                    .map_err(|_| Error::InvalidStatus(raw.clone()))
            })
            .transpose()?;
        let interview_date = non_blank(payload.interview_date)
            .map(|raw| parse_interview_date(&raw))
            .transpose()?;
        // A location may be changed but never cleared.
        let location = payload
            .location
            .map(|raw| require_text(Some(raw), "location"))
            .transpose()?;

        let patch = InterviewPatch {
            interview_date,
            location,
            notes: payload.notes,
            status,
            feedback: payload.feedback,
            rating: payload.rating,
        };
        let interview = self.store.update_interview(id, patch).await?;
        info!(interview_id = id, updated_by = caller.user_id, "interview updated");
        Ok(interview)
    }

    pub async fn list_for_candidate(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<CandidateInterviewView>> {
        let caller = ctx.require_session()?;
        self.store.list_interviews_for_candidate(caller.user_id).await
    }

    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<InterviewView>> {
        ctx.require_privileged()?;
        self.store.list_interviews().await
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<InterviewListing> {
        let caller = ctx.require_session()?;
        match caller.role {
            Role::Candidate => Ok(InterviewListing::Candidate(
                self.list_for_candidate(ctx).await?,
            )),
            Role::Hr | Role::Admin => Ok(InterviewListing::Staff(self.list_all(ctx).await?)),
        }
    }
}
