//! Pure state transition function
//!
//! Reconciliation rules:
//! - the transcript's turns are only ever replaced wholesale, by a sequence the
//!   agent service returned or by the synthesized greeting after a clear;
//! - submit and reset are accepted only while `Idle`, so at most one remote
//!   call is ever in flight;
//! - every accepted request resolves back to `Idle`, success or failure.

use super::{ChatState, Effect, Event, Phase};
use crate::transcript::{LOAD_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A message is already being sent, wait for the reply")]
    SubmissionPending,
    #[error("The conversation is still loading")]
    HistoryLoading,
    #[error("The conversation is being cleared")]
    ResetInProgress,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Rejection for a user request arriving while `phase` is busy
    fn busy(phase: Phase) -> Self {
        match phase {
            Phase::Submitting => TransitionError::SubmissionPending,
            Phase::LoadingHistory => TransitionError::HistoryLoading,
            Phase::Clearing => TransitionError::ResetInProgress,
            Phase::Idle => {
                TransitionError::InvalidTransition("idle state reported as busy".to_string())
            }
        }
    }

    /// Whether this is a gate rejection of a user request
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TransitionError::InvalidTransition(_))
    }
}

/// Pure transition function
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    let mut next = state.clone();

    match (state.phase, event) {
        // ============================================================
        // Startup load
        // ============================================================
        (Phase::LoadingHistory, Event::HistoryLoaded { turns }) => {
            next.phase = Phase::Idle;
            next.transcript.replace_turns(turns);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        // Turns stay empty; the client waits for the user's first submission
        (Phase::LoadingHistory, Event::HistoryFailed { .. }) => {
            next.phase = Phase::Idle;
            next.transcript.set_error(LOAD_FAILED_MESSAGE);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        // ============================================================
        // Submission
        // ============================================================
        (Phase::Idle, Event::UserSubmit { input }) => {
            next.transcript.clear_error();
            next.phase = Phase::Submitting;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishView)
                .with_effect(Effect::SendTurn { input }))
        }

        (Phase::Submitting, Event::ExchangeSucceeded { turns }) => {
            next.phase = Phase::Idle;
            next.transcript.replace_turns(turns);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        (Phase::Submitting, Event::ExchangeFailed { .. }) => {
            next.phase = Phase::Idle;
            next.transcript.set_error(SUBMIT_FAILED_MESSAGE);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        // ============================================================
        // Reset
        // ============================================================
        (Phase::Idle, Event::ResetRequested) => {
            next.phase = Phase::Clearing;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishView)
                .with_effect(Effect::ClearHistory))
        }

        (Phase::Clearing, Event::ResetSucceeded) => {
            next.phase = Phase::Idle;
            next.transcript.reset_to_greeting();
            Ok(TransitionResult::new(next).with_effect(Effect::PublishView))
        }

        // Abandoned: transcript untouched, failure goes to the log only
        (Phase::Clearing, Event::ResetFailed { error }) => {
            next.phase = Phase::Idle;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::LogFailure {
                    operation: "clear_history",
                    error,
                })
                .with_effect(Effect::PublishView))
        }

        // ============================================================
        // Gate rejections
        // ============================================================
        (phase, Event::UserSubmit { .. } | Event::ResetRequested) => {
            Err(TransitionError::busy(phase))
        }

        // Completion events that do not match the outstanding call
        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {phase:?}",
            event.name()
        ))),
    }
}
