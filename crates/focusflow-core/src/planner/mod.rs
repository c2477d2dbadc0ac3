//! AI study plans for the pending backlog.
//!
//! This is a best-effort collaborator: the caller always gets a string.
//! Failures are logged and replaced with an encouraging fallback.

mod client;
mod prompt;

pub use client::PlanClient;
pub use prompt::{backlog_lines, build_prompt};

use crate::model::BacklogItem;
use crate::storage::PlannerConfig;

pub const EMPTY_BACKLOG_MESSAGE: &str =
    "No pending backlog items! Time to relax or start a new chapter.";
pub const NO_PLAN_MESSAGE: &str = "Couldn't generate a plan. Try again later.";
pub const BUSY_MESSAGE: &str =
    "The AI mentor is busy preparing questions for the next mock test. Please try again later.";

pub struct StudyPlanner {
    client: Result<PlanClient, crate::error::PlannerError>,
}

impl StudyPlanner {
    pub fn new(client: PlanClient) -> Self {
        Self { client: Ok(client) }
    }

    /// Build from configuration. A missing API key is not an error here; it
    /// surfaces as the fallback message when a plan is requested.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            client: PlanClient::from_env(config),
        }
    }

    pub async fn generate_study_plan(&self, backlog: &[BacklogItem]) -> String {
        let pending: Vec<&BacklogItem> = backlog.iter().filter(|i| i.is_pending()).collect();
        if pending.is_empty() {
            return EMPTY_BACKLOG_MESSAGE.to_string();
        }

        let client = match &self.client {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "study planner unavailable");
                return BUSY_MESSAGE.to_string();
            }
        };

        let prompt = build_prompt(&pending);
        tracing::debug!(items = pending.len(), "requesting study plan");
        match client.generate(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_PLAN_MESSAGE.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "study plan request failed");
                BUSY_MESSAGE.to_string()
            }
        }
    }
}
