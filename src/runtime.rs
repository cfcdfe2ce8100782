//! Runtime for the chat session
//!
//! The runtime task is the only writer of the conversation state. Surfaces
//! talk to it through a `ChatHandle` and observe it through view snapshots.

mod executor;


pub use executor::ChatRuntime;

use crate::backend::ChatBackend;
use crate::state_machine::{ChatState, ChatView, Event, TransitionError};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// An event plus, for user requests, where to report acceptance
#[derive(Debug)]
pub struct Envelope {
    pub event: Event,
    pub ack: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

impl Envelope {
    /// Result of a remote call; nobody waits on it
    pub fn completion(event: Event) -> Self {
        Self { event, ack: None }
    }
}

/// Errors returned to callers of the handle
#[derive(Debug, Error)]
pub enum HandleError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Chat runtime is not running")]
    RuntimeStopped,
}

/// Handle to interact with the running chat session
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Envelope>,
    view_rx: watch::Receiver<ChatView>,
}

impl ChatHandle {
    /// Submit one user turn
    ///
    /// Returns once the runtime has accepted or rejected the request; the
    /// exchange itself completes in the background.
    pub async fn submit(&self, input: impl Into<String>) -> Result<(), HandleError> {
        self.request(Event::UserSubmit {
            input: input.into(),
        })
        .await
    }

    /// Clear the conversation back to the opening prompt
    pub async fn reset(&self) -> Result<(), HandleError> {
        self.request(Event::ResetRequested).await
    }

    /// Current view snapshot
    pub fn view(&self) -> ChatView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.view_rx.clone()
    }

    async fn request(&self, event: Event) -> Result<(), HandleError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.event_tx
            .send(Envelope {
                event,
                ack: Some(ack_tx),
            })
            .await
            .map_err(|_| HandleError::RuntimeStopped)?;

        ack_rx
            .await
            .map_err(|_| HandleError::RuntimeStopped)?
            .map_err(HandleError::Rejected)
    }
}

/// Start the chat runtime in the background
///
/// The startup history fetch is issued as soon as the task runs. The task
/// stops when `shutdown` is cancelled.
pub fn start<B: ChatBackend + 'static>(
    backend: B,
    shutdown: CancellationToken,
) -> (ChatHandle, JoinHandle<()>) {
    let state = ChatState::new();
    let (event_tx, event_rx) = mpsc::channel(32);
    let (view_tx, view_rx) = watch::channel(state.view());

    let runtime = ChatRuntime::new(state, backend, event_rx, event_tx.clone(), view_tx, shutdown);
    let task = tokio::spawn(runtime.run());

    (ChatHandle { event_tx, view_rx }, task)
}
