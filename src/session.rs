// src/session.rs
//! Submission lifecycle: Idle -> Submitting -> Success/Failed -> Idle

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::analyzer_client::AnalyzerError;
use crate::core::AnalyzerClient;
use crate::types::analysis::{AnalysisRequest, AnalysisResult};

/// What the flow is currently showing. `Success` and `Failed` are both
/// left by resetting or by starting the next submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success(AnalysisResult),
    Failed(String),
}

/// Why a submit call did not go out.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitRefusal {
    /// A previous submission is still in flight. The attempt is refused,
    /// not queued.
    InFlight,
}

/// Holds the single in-memory result of the current session and enforces
/// that at most one request is ever in flight.
pub struct AnalysisSession {
    client: AnalyzerClient,
    state: SubmissionState,
}

impl AnalysisSession {
    pub fn new(client: AnalyzerClient) -> Self {
        Self {
            client,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SubmissionState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Drop any held result and return to `Idle`. A submission in flight
    /// cannot be cancelled and is left to finish.
    pub fn reset(&mut self) {
        if self.state != SubmissionState::Submitting {
            self.state = SubmissionState::Idle;
        }
    }

    /// Move to `Submitting`, refusing if a request is already in flight.
    /// Whatever the previous submission produced is discarded here.
    pub fn begin_submission(&mut self) -> Result<Uuid, SubmitRefusal> {
        if self.state == SubmissionState::Submitting {
            warn!("Submission refused: another request is in flight");
            return Err(SubmitRefusal::InFlight);
        }

        let submission_id = Uuid::new_v4();
        info!("Submission {} started", submission_id);
        self.state = SubmissionState::Submitting;
        Ok(submission_id)
    }

    /// Record the outcome of the in-flight submission. Only meaningful
    /// after `begin_submission`.
    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalyzerError>) {
        self.state = match outcome {
            Ok(result) => {
                info!("Analysis complete");
                SubmissionState::Success(result)
            }
            Err(err) => {
                error!("Analysis failed: {}", err);
                SubmissionState::Failed(err.user_message())
            }
        };
    }

    /// Run one full submission. The request is built fresh by the caller
    /// and dropped when this returns.
    pub async fn submit(
        &mut self,
        request: AnalysisRequest,
    ) -> Result<&SubmissionState, SubmitRefusal> {
        self.begin_submission()?;
        let outcome = self.client.analyze(&request).await;
        self.complete(outcome);
        Ok(&self.state)
    }
}
