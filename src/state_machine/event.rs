//! Events that can occur in a conversation

use crate::examiner::ExaminerErrorKind;
use crate::marks::MarkTier;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    SelectMarks(MarkTier),
    UpdateDraft(String),
    Submit,

    // Examiner events
    ExaminerAnswered {
        answer: String,
    },
    ExaminerFailed {
        kind: ExaminerErrorKind,
        message: String,
    },
}
