//! Events that can occur in a chat session

use crate::backend::BackendError;
use crate::transcript::Turn;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Startup load
    HistoryLoaded { turns: Vec<Turn> },
    HistoryFailed { error: BackendError },

    // User events
    UserSubmit { input: String },
    ResetRequested,

    // Exchange results
    ExchangeSucceeded { turns: Vec<Turn> },
    ExchangeFailed { error: BackendError },

    // Clear results
    ResetSucceeded,
    ResetFailed { error: BackendError },
}

impl Event {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::HistoryLoaded { .. } => "history_loaded",
            Event::HistoryFailed { .. } => "history_failed",
            Event::UserSubmit { .. } => "user_submit",
            Event::ResetRequested => "reset_requested",
            Event::ExchangeSucceeded { .. } => "exchange_succeeded",
            Event::ExchangeFailed { .. } => "exchange_failed",
            Event::ResetSucceeded => "reset_succeeded",
            Event::ResetFailed { .. } => "reset_failed",
        }
    }

    /// The remote failure this event reports, if any
    pub fn failure(&self) -> Option<&BackendError> {
        match self {
            Event::HistoryFailed { error }
            | Event::ExchangeFailed { error }
            | Event::ResetFailed { error } => Some(error),
            _ => None,
        }
    }
}
