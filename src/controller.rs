//! Conversation controller runtime
//!
//! Owns the session, runs the pure state machine, and executes its effects.
//! At most one examiner request is in flight at a time; its outcome comes
//! back through the same event channel as user commands, so the loop is
//! never blocked while a request is pending.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationController;

use crate::marks::MarkTier;
use crate::state_machine::{AdmissionRejected, Event, Phase, Session, TransitionError};
use crate::transcript::{TranscriptStore, Turn};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

/// Events published to front ends
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    TurnAppended(Turn),
    PhaseChanged(Phase),
    SubmitRejected(AdmissionRejected),
}

/// What happened to a `submit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(AdmissionRejected),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("conversation controller has stopped")]
    Closed,
}

/// An event plus an optional reply slot for its transition outcome
pub(crate) struct Envelope {
    pub event: Event,
    pub reply: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

impl Envelope {
    pub fn new(event: Event) -> Self {
        Self { event, reply: None }
    }
}

/// Cloneable handle to a running controller
#[derive(Clone)]
pub struct ControllerHandle {
    event_tx: mpsc::Sender<Envelope>,
    broadcast_tx: broadcast::Sender<ControllerEvent>,
    session_rx: watch::Receiver<Session>,
    transcript: Arc<dyn TranscriptStore>,
}

impl ControllerHandle {
    pub async fn select_marks(&self, marks: MarkTier) -> Result<(), ControllerError> {
        self.dispatch(Event::SelectMarks(marks)).await?;
        Ok(())
    }

    pub async fn update_draft(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        self.dispatch(Event::UpdateDraft(text.into())).await?;
        Ok(())
    }

    /// Submit the current draft. Rejection is a no-op, not an error.
    pub async fn submit(&self) -> Result<SubmitOutcome, ControllerError> {
        match self.dispatch(Event::Submit).await? {
            Err(TransitionError::Rejected(reason)) => Ok(SubmitOutcome::Rejected(reason)),
            _ => Ok(SubmitOutcome::Accepted),
        }
    }

    /// Session as of the last fully processed event
    pub fn snapshot(&self) -> Session {
        self.session_rx.borrow().clone()
    }

    pub async fn transcript(&self) -> Vec<Turn> {
        self.transcript.turns().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Wait until no request is in flight.
    ///
    /// There is no timeout here: a backend that never answers keeps the
    /// conversation in `Sending`. Wrap in `tokio::time::timeout` if needed.
    pub async fn wait_idle(&self) -> Result<Session, ControllerError> {
        let mut rx = self.session_rx.clone();
        let session = rx
            .wait_for(|s| !s.in_flight())
            .await
            .map_err(|_| ControllerError::Closed)?;
        Ok(session.clone())
    }

    async fn dispatch(&self, event: Event) -> Result<Result<(), TransitionError>, ControllerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.event_tx
            .send(Envelope {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| ControllerError::Closed)?;
        reply_rx.await.map_err(|_| ControllerError::Closed)
    }
}
