//! Pipeline Controller — sequences the extraction and generation stages.
//!
//! Flow: validate inputs → extract → generate → terminal state.
//! The two LLM calls are strictly sequential; generation's input depends on
//! extraction's output. No cancellation, no timeout, no retries — a single
//! failed call ends the run in `Error`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::letter::extraction::{extract, JobExtraction};
use crate::letter::generation::generate_letter;
use crate::llm_client::Completion;

/// Pipeline run status. Exactly one value is active at a time; transitions
/// are strictly linear, with any state able to fall to `Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Extracting,
    Generating,
    Success,
    Error,
}

/// Snapshot of a single pipeline run, owned by the controller. The
/// presentation layer only reads it, never mutates it directly. Letter and
/// error are mutually exclusive outcomes of a run; the stored extraction
/// survives a generation failure for diagnostics.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub status: PipelineStatus,
    pub extraction: Option<JobExtraction>,
    pub letter: Option<String>,
    pub error: Option<AppError>,
}

/// Sequencing state machine driving the two stages.
///
/// `start` takes `&mut self`, which is the sequential-awaiting guarantee: no
/// second run can begin while one is in flight. The HTTP layer builds one
/// controller per request, so no locking exists anywhere.
pub struct Pipeline {
    llm: Arc<dyn Completion>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(llm: Arc<dyn Completion>) -> Self {
        Self {
            llm,
            state: PipelineState::default(),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn into_state(self) -> PipelineState {
        self.state
    }

    /// Runs the pipeline to a terminal state.
    ///
    /// Transitions: `Idle/Success/Error → Extracting → Generating → Success`,
    /// with any step able to fall to `Error`. Terminal states are
    /// re-startable; a valid start clears everything from the previous run.
    /// Blank inputs go straight to `Error` without any LLM call.
    pub async fn start(&mut self, resume: &str, job_description: &str) -> &PipelineState {
        if resume.trim().is_empty() || job_description.trim().is_empty() {
            self.state.error = Some(AppError::Validation(
                "Please provide both your experience and the job description.".to_string(),
            ));
            self.state.status = PipelineStatus::Error;
            return &self.state;
        }

        // A new run clears the previous result before anything else.
        self.state.extraction = None;
        self.state.letter = None;
        self.state.error = None;

        let run_id = Uuid::new_v4();

        self.state.status = PipelineStatus::Extracting;
        info!(%run_id, "Extracting company and key requirements");

        let extraction = match extract(job_description, self.llm.as_ref()).await {
            Ok(extraction) => extraction,
            Err(e) => return self.fail(run_id, e),
        };

        self.state.status = PipelineStatus::Generating;
        info!(%run_id, company = %extraction.company, "Generating tailored cover letter");

        let generated = generate_letter(&extraction, resume, self.llm.as_ref()).await;
        self.state.extraction = Some(extraction);

        match generated {
            Ok(letter) => {
                self.state.letter = Some(letter);
                self.state.status = PipelineStatus::Success;
                info!(%run_id, "Cover letter generated");
            }
            Err(e) => return self.fail(run_id, e),
        }

        &self.state
    }

    fn fail(&mut self, run_id: Uuid, error: AppError) -> &PipelineState {
        warn!(%run_id, %error, "Pipeline run failed");
        self.state.error = Some(error);
        self.state.status = PipelineStatus::Error;
        &self.state
    }
}
