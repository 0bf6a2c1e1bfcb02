//! Pure state transition function
//!
//! Given the same session and event this always produces the same outcome,
//! with no I/O. Admission control lives here: a submission is accepted only
//! with a tier chosen, a non-blank draft, and no request in flight.

use super::{Effect, Event, Phase, Session};
use thiserror::Error;

/// Text of the assistant turn synthesized when a request fails
pub const EXAMINER_UNAVAILABLE: &str =
    "Error connecting to Examiner Engine. Please ensure the backend is running.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: Session) -> Self {
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

/// Why a submission was not admitted. Never shown as an error turn.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AdmissionRejected {
    #[error("no mark allocation selected")]
    NoTierSelected,
    #[error("question is empty")]
    EmptyDraft,
    #[error("a request is already in flight")]
    RequestInFlight,
}

/// Errors that can occur during transition
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("submission rejected: {0}")]
    Rejected(#[from] AdmissionRejected),
    #[error("examiner resolution received with no request in flight")]
    UnexpectedResolution,
}

pub fn transition(session: &Session, event: Event) -> Result<TransitionResult, TransitionError> {
    match (session.phase, event) {
        // Tier and draft edits are always accepted and never touch history
        (_, Event::SelectMarks(marks)) => Ok(TransitionResult::new(Session {
            pending_marks: Some(marks),
            ..session.clone()
        })),

        (_, Event::UpdateDraft(draft)) => Ok(TransitionResult::new(Session {
            draft,
            ..session.clone()
        })),

        // ============================================================
        // Admission control
        // ============================================================
        (Phase::Sending { .. }, Event::Submit) => Err(AdmissionRejected::RequestInFlight.into()),

        (Phase::Idle, Event::Submit) => {
            let marks = session
                .pending_marks
                .ok_or(AdmissionRejected::NoTierSelected)?;
            if session.draft.trim().is_empty() {
                return Err(AdmissionRejected::EmptyDraft.into());
            }

            let query = session.draft.clone();
            let phase = Phase::Sending { marks };
            Ok(TransitionResult::new(Session {
                pending_marks: session.pending_marks,
                draft: String::new(),
                phase,
            })
            .with_effect(Effect::append_user(query.clone(), marks))
            .with_effect(Effect::NotifyPhase(phase))
            .with_effect(Effect::RequestExaminer { query, marks }))
        }

        // ============================================================
        // Resolution: exactly one assistant turn per accepted submission
        // ============================================================
        (Phase::Sending { marks }, Event::ExaminerAnswered { answer }) => Ok(resolve(session)
            .with_effect(Effect::append_answer(answer, marks))
            .with_effect(Effect::NotifyPhase(Phase::Idle))),

        (Phase::Sending { marks }, Event::ExaminerFailed { .. }) => Ok(resolve(session)
            .with_effect(Effect::append_error(EXAMINER_UNAVAILABLE, marks))
            .with_effect(Effect::NotifyPhase(Phase::Idle))),

        (Phase::Idle, Event::ExaminerAnswered { .. } | Event::ExaminerFailed { .. }) => {
            Err(TransitionError::UnexpectedResolution)
        }
    }
}

/// Back to `Idle`, keeping whatever tier and draft the user set meanwhile
fn resolve(session: &Session) -> TransitionResult {
    TransitionResult::new(Session {
        phase: Phase::Idle,
        ..session.clone()
    })
}
