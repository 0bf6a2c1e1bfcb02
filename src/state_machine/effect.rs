//! Effects produced by state transitions

use crate::marks::MarkTier;
use crate::state_machine::state::Phase;
use crate::transcript::Role;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript (id and timestamp assigned on execution)
    AppendTurn {
        role: Role,
        text: String,
        marks: MarkTier,
        is_error: bool,
    },

    /// Dispatch the question to the examiner backend
    RequestExaminer { query: String, marks: MarkTier },

    /// Tell subscribers the request lifecycle moved
    NotifyPhase(Phase),
}

impl Effect {
    pub fn append_user(text: impl Into<String>, marks: MarkTier) -> Self {
        Effect::AppendTurn {
            role: Role::User,
            text: text.into(),
            marks,
            is_error: false,
        }
    }

    pub fn append_answer(text: impl Into<String>, marks: MarkTier) -> Self {
        Effect::AppendTurn {
            role: Role::Assistant,
            text: text.into(),
            marks,
            is_error: false,
        }
    }

    pub fn append_error(text: impl Into<String>, marks: MarkTier) -> Self {
        Effect::AppendTurn {
            role: Role::Assistant,
            text: text.into(),
            marks,
            is_error: true,
        }
    }
}
