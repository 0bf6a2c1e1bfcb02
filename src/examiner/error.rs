//! Examiner error types

use thiserror::Error;

/// Examiner error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExaminerError {
    pub kind: ExaminerErrorKind,
    pub message: String,
}

impl ExaminerError {
    pub fn new(kind: ExaminerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ExaminerErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ExaminerErrorKind::Status, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ExaminerErrorKind::Protocol, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ExaminerErrorKind::Internal, message)
    }
}

/// Failure classification.
///
/// Kept for logs only: every kind ends in the same error turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExaminerErrorKind {
    /// Connection refused, DNS, timeout, body read failure
    Network,
    /// Non-2xx HTTP status
    Status,
    /// 2xx response without a usable `answer` string
    Protocol,
    /// The client task died before producing a result
    Internal,
}
