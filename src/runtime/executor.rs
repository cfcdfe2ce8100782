//! Chat runtime executor

use super::Envelope;
use crate::backend::ChatBackend;
use crate::state_machine::{transition, ChatState, ChatView, Effect, Event};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Event loop that owns the chat state and runs effects against a backend
pub struct ChatRuntime<B>
where
    B: ChatBackend + 'static,
{
    state: ChatState,
    backend: Arc<B>,
    event_rx: mpsc::Receiver<Envelope>,
    /// Cloned into background calls so they can report completion
    event_tx: mpsc::Sender<Envelope>,
    view_tx: watch::Sender<ChatView>,
    shutdown: CancellationToken,
}

impl<B> ChatRuntime<B>
where
    B: ChatBackend + 'static,
{
    pub fn new(
        state: ChatState,
        backend: B,
        event_rx: mpsc::Receiver<Envelope>,
        event_tx: mpsc::Sender<Envelope>,
        view_tx: watch::Sender<ChatView>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            state,
            backend: Arc::new(backend),
            event_rx,
            event_tx,
            view_tx,
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Starting chat runtime");

        // The one and only history load for this client
        self.execute_effect(Effect::FetchHistory);

        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                Some(envelope) = self.event_rx.recv() => {
                    self.process_event(envelope);
                }

                else => break,
            }
        }

        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, envelope: Envelope) {
        let Envelope { event, ack } = envelope;
        let event_name = event.name();

        if let Some(error) = event.failure() {
            tracing::warn!(
                event = event_name,
                kind = error.kind.as_str(),
                error = %error.message,
                "Remote call failed"
            );
        }

        let outcome = match transition(&self.state, event) {
            Ok(result) => {
                self.state = result.new_state;
                tracing::debug!(
                    event = event_name,
                    phase = ?self.state.phase,
                    turns = self.state.transcript.turns().len(),
                    "Transition applied"
                );
                for effect in result.effects {
                    self.execute_effect(effect);
                }
                Ok(())
            }
            Err(e) if e.is_rejection() => {
                tracing::info!(event = event_name, reason = %e, "Request rejected");
                Err(e)
            }
            Err(e) => {
                tracing::warn!(event = event_name, error = %e, "Ignoring unexpected event");
                Err(e)
            }
        };

        if let Some(ack) = ack {
            // The caller may have gone away; the outcome is already applied
            let _ = ack.send(outcome);
        }
    }

    /// Execute an effect
    ///
    /// Remote calls are spawned so the loop stays responsive; each reports
    /// back with exactly one completion event.
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::FetchHistory => {
                let backend = self.backend.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    let event = match backend.fetch_history().await {
                        Ok(turns) => {
                            tracing::info!(turns = turns.len(), "Initial history fetched");
                            Event::HistoryLoaded { turns }
                        }
                        Err(error) => Event::HistoryFailed { error },
                    };
                    let _ = event_tx.send(Envelope::completion(event)).await;
                });
            }

            Effect::SendTurn { input } => {
                let backend = self.backend.clone();
                let event_tx = self.event_tx.clone();
                let submission_id = uuid::Uuid::new_v4();
                let span = tracing::info_span!("submission", %submission_id);

                tokio::spawn(
                    async move {
                        tracing::info!(chars = input.chars().count(), "Sending user turn");
                        let event = match backend.send_turn(&input).await {
                            Ok(turns) => Event::ExchangeSucceeded { turns },
                            Err(error) => Event::ExchangeFailed { error },
                        };
                        let _ = event_tx.send(Envelope::completion(event)).await;
                    }
                    .instrument(span),
                );
            }

            Effect::ClearHistory => {
                let backend = self.backend.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    let event = match backend.clear_history().await {
                        Ok(()) => Event::ResetSucceeded,
                        Err(error) => Event::ResetFailed { error },
                    };
                    let _ = event_tx.send(Envelope::completion(event)).await;
                });
            }

            Effect::LogFailure { operation, error } => {
                tracing::error!(
                    operation,
                    kind = error.kind.as_str(),
                    error = %error.message,
                    "Request abandoned"
                );
            }

            Effect::PublishView => {
                self.view_tx.send_replace(self.state.view());
            }
        }
    }
}
