//! Conversation controller state

use crate::marks::MarkTier;

/// Request lifecycle of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ready for a submission
    #[default]
    Idle,

    /// One examiner request in flight, tier frozen at submission
    Sending { marks: MarkTier },
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Sending { .. } => "sending",
        }
    }
}

/// Controller-owned session state.
///
/// The transcript itself lives in a `TranscriptStore`; the state machine
/// only decides which turns get appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Tier the next submission will be graded under
    pub pending_marks: Option<MarkTier>,
    /// Current unsent question text, stored verbatim
    pub draft: String,
    pub phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a tier already chosen
    pub fn with_marks(marks: MarkTier) -> Self {
        Self {
            pending_marks: Some(marks),
            ..Self::default()
        }
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }
}
