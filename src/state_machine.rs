//! Conversation reconciliation state machine
//!
//! Pure transitions from (state, event) to a new state plus the effects the
//! runtime must carry out. No I/O happens here.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatState, ChatView, Phase, SubmissionState};
pub use transition::{transition, TransitionError};
