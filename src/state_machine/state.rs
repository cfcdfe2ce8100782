//! Conversation state types

use crate::transcript::Transcript;
use serde::Serialize;

/// What the coordinator is currently waiting on
///
/// Every phase other than `Idle` has exactly one remote call in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Startup history fetch in flight
    #[default]
    LoadingHistory,

    /// Ready for user input, nothing in flight
    Idle,

    /// A user turn is being exchanged with the agent service
    Submitting,

    /// The clear call is in flight
    Clearing,
}

/// Submission gate as seen by the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Pending,
}

/// Full coordinator state: the transcript plus the current phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub phase: Phase,
    pub transcript: Transcript,
}

impl ChatState {
    /// Fresh state at client start: empty transcript, history load pending
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission_state(&self) -> SubmissionState {
        if self.phase == Phase::Submitting {
            SubmissionState::Pending
        } else {
            SubmissionState::Idle
        }
    }

    /// Whether a submit or reset would be accepted right now
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Read-only snapshot for the render layer
    pub fn view(&self) -> ChatView {
        ChatView {
            transcript: self.transcript.clone(),
            submission: self.submission_state(),
            phase: self.phase,
            accepting_input: self.accepts_input(),
        }
    }
}

/// Snapshot handed to the presenter and the web surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub transcript: Transcript,
    pub submission: SubmissionState,
    pub phase: Phase,
    pub accepting_input: bool,
}

impl ChatView {
    pub fn is_pending(&self) -> bool {
        self.submission == SubmissionState::Pending
    }
}
