//! Examiner Engine client
//!
//! The examiner backend grades a question under a mark tier and returns the
//! answer as plain text. Only its request/response contract matters here.

mod error;
mod http;

pub use error::{ExaminerError, ExaminerErrorKind};
pub use http::HttpExaminer;

use crate::marks::MarkTier;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;

/// A question to be graded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExaminerRequest {
    pub query: String,
    pub marks: MarkTier,
}

/// Decoded examiner response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExaminerReply {
    /// Raw answer text in the examiner's marker vocabulary
    pub answer: String,
    /// Tier echoed back by the backend, when present and readable
    #[serde(default, deserialize_with = "lenient_marks")]
    pub marks: Option<u8>,
}

/// The echo is informational: an unreadable value must not sink a valid answer.
fn lenient_marks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Common interface for examiner backends
#[async_trait]
pub trait ExaminerClient: Send + Sync {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError>;
}

#[async_trait]
impl<T: ExaminerClient + ?Sized> ExaminerClient for Arc<T> {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        (**self).ask(request).await
    }
}

/// Logging wrapper for examiner clients
pub struct LoggingExaminer<C> {
    inner: C,
}

impl<C: ExaminerClient> LoggingExaminer<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ExaminerClient> ExaminerClient for LoggingExaminer<C> {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                if let Some(echoed) = reply.marks.filter(|m| *m != request.marks.value()) {
                    tracing::warn!(
                        requested = request.marks.value(),
                        echoed,
                        "Examiner graded under a different tier than requested"
                    );
                }
                tracing::info!(
                    tier = request.marks.value(),
                    duration_ms = %duration.as_millis(),
                    answer_len = reply.answer.len(),
                    "Examiner request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    tier = request.marks.value(),
                    duration_ms = %duration.as_millis(),
                    error_kind = ?e.kind,
                    error = %e.message,
                    "Examiner request failed"
                );
            }
        }

        result
    }
}
