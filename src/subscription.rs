use crate::api::PostResponse;
use crate::errors::ApiError;
use serde::Serialize;
use tracing::{info, warn};

pub const SUBMITTING: &str = "Submitting...";
pub const SUBSCRIBED: &str = "Check your inbox to confirm subscription.";
pub const SUBSCRIBE_FAILED: &str = "Subscription failed.";
pub const NETWORK_FAILED: &str = "Network error. Try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub message: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriptionForm {
    pub email: String,
    state: SubmitState,
    feedback: Option<Feedback>,
    #[serde(skip)]
    submission: u64,
}

impl SubscriptionForm {
    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Enters `Submitting` with the given field value, from any state.
    ///
    /// Returns the submission number that `apply` must be handed back.
    pub fn begin(&mut self, email: impl Into<String>) -> u64 {
        self.submission += 1;
        self.email = email.into();
        self.state = SubmitState::Submitting;
        self.feedback = Some(Feedback {
            message: SUBMITTING.to_string(),
            tone: Tone::Info,
        });
        self.submission
    }

    pub fn succeed(&mut self) {
        self.email.clear();
        self.finish(SubmitState::Success, SUBSCRIBED.to_string(), Tone::Success);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.finish(SubmitState::Failed, message.into(), Tone::Error);
    }

    /// Maps the backend's answer to feedback. Nothing is propagated.
    ///
    /// Answers to anything but the latest `begin` are dropped so an earlier
    /// request cannot clear or overwrite a newer submission.
    pub fn apply(&mut self, submission: u64, result: Result<PostResponse, ApiError>) -> bool {
        if submission != self.submission {
            info!(
                "dropping answer to subscription #{submission}; #{} is pending",
                self.submission
            );
            return false;
        }
        match result {
            Ok(resp) if resp.ok => {
                info!("subscription accepted");
                self.succeed();
            }
            Ok(resp) => {
                let detail = resp
                    .json
                    .get("detail")
                    .and_then(|detail| detail.as_str())
                    .filter(|detail| !detail.is_empty())
                    .unwrap_or(SUBSCRIBE_FAILED)
                    .to_string();
                warn!("subscription rejected with status {}: {detail}", resp.status);
                self.fail(detail);
            }
            Err(err) => {
                warn!("subscription request failed: {err}");
                self.fail(NETWORK_FAILED);
            }
        }
        true
    }

    fn finish(&mut self, state: SubmitState, message: String, tone: Tone) {
        self.state = state;
        self.feedback = Some(Feedback { message, tone });
    }
}
