//! Conversation controller executor

use super::{ControllerEvent, ControllerHandle, Envelope};
use crate::examiner::{ExaminerClient, ExaminerError, ExaminerRequest};
use crate::state_machine::{transition, Effect, Event, Session, TransitionError};
use crate::transcript::{TranscriptStore, Turn};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Generic controller that can work with any examiner and transcript store
pub struct ConversationController<C, S>
where
    C: ExaminerClient + 'static,
    S: TranscriptStore + 'static,
{
    session: Session,
    examiner: Arc<C>,
    transcript: Arc<S>,
    event_rx: mpsc::Receiver<Envelope>,
    /// Weak so the loop ends once every handle is dropped and no request is pending
    event_tx: mpsc::WeakSender<Envelope>,
    broadcast_tx: broadcast::Sender<ControllerEvent>,
    session_tx: watch::Sender<Session>,
}

impl<C, S> ConversationController<C, S>
where
    C: ExaminerClient + 'static,
    S: TranscriptStore + 'static,
{
    pub fn new(examiner: C, transcript: Arc<S>, session: Session) -> (Self, ControllerHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (session_tx, session_rx) = watch::channel(session.clone());

        let handle = ControllerHandle {
            event_tx: event_tx.clone(),
            broadcast_tx: broadcast_tx.clone(),
            session_rx,
            transcript: transcript.clone(),
        };
        let controller = Self {
            session,
            examiner: Arc::new(examiner),
            transcript,
            event_rx,
            event_tx: event_tx.downgrade(),
            broadcast_tx,
            session_tx,
        };
        (controller, handle)
    }

    /// Start the controller loop on the current tokio runtime
    pub fn spawn(examiner: C, transcript: Arc<S>, session: Session) -> ControllerHandle {
        let (controller, handle) = Self::new(examiner, transcript, session);
        tokio::spawn(controller.run());
        handle
    }

    pub async fn run(mut self) {
        tracing::info!("Starting conversation controller");

        // Process events one at a time - no recursion
        while let Some(Envelope { event, reply }) = self.event_rx.recv().await {
            let outcome = self.process_event(event).await;
            if let Some(reply) = reply {
                let _ = reply.send(outcome);
            }
        }

        tracing::info!("Conversation controller stopped");
    }

    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        if let Event::ExaminerFailed { kind, message } = &event {
            tracing::warn!(?kind, %message, "Examiner request failed, recording error turn");
        }

        let result = match transition(&self.session, event) {
            Ok(r) => r,
            Err(TransitionError::Rejected(reason)) => {
                tracing::debug!(%reason, "Submission not admitted");
                let _ = self
                    .broadcast_tx
                    .send(ControllerEvent::SubmitRejected(reason));
                return Err(TransitionError::Rejected(reason));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping event");
                return Err(e);
            }
        };

        self.session = result.new_state;
        for effect in result.effects {
            self.execute_effect(effect).await;
        }

        // Published last so observers of `Idle` also see the resolving turn
        self.session_tx.send_replace(self.session.clone());
        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn {
                role,
                text,
                marks,
                is_error,
            } => {
                let turn = Turn::new(role, text, marks, is_error);
                self.transcript.append(turn.clone()).await;
                let _ = self.broadcast_tx.send(ControllerEvent::TurnAppended(turn));
            }

            Effect::NotifyPhase(phase) => {
                tracing::debug!(phase = phase.name(), "Phase changed");
                let _ = self.broadcast_tx.send(ControllerEvent::PhaseChanged(phase));
            }

            Effect::RequestExaminer { query, marks } => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    // Every handle is gone; nobody is left to see the answer
                    tracing::warn!("Controller closing, examiner request not sent");
                    return;
                };
                let examiner = self.examiner.clone();

                // Spawn examiner request as background task
                tokio::spawn(async move {
                    tracing::info!(tier = marks.value(), "Making examiner request (background)");
                    let request = ExaminerRequest { query, marks };

                    // A panicking client must still resolve the request
                    let asked = tokio::spawn(async move { examiner.ask(&request).await }).await;
                    let outcome = asked.unwrap_or_else(|e| {
                        Err(ExaminerError::internal(format!("Examiner task failed: {e}")))
                    });

                    let event = match outcome {
                        Ok(reply) => Event::ExaminerAnswered {
                            answer: reply.answer,
                        },
                        Err(e) => Event::ExaminerFailed {
                            kind: e.kind,
                            message: e.message,
                        },
                    };
                    let _ = event_tx.send(Envelope::new(event)).await;
                });
            }
        }
    }
}
