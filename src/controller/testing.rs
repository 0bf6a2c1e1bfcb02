//! Mock implementations for testing
//!
//! These mocks enable controller testing without a real examiner backend.

use super::{ConversationController, ControllerHandle, SubmitOutcome};
use crate::examiner::{ExaminerClient, ExaminerError, ExaminerReply, ExaminerRequest};
use crate::marks::MarkTier;
use crate::state_machine::Session;
use crate::transcript::InMemoryTranscript;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Examiner
// ============================================================================

/// Mock examiner that returns queued replies
pub struct MockExaminer {
    replies: Mutex<VecDeque<Result<ExaminerReply, ExaminerError>>>,
    /// Record of all requests made
    requests: Mutex<Vec<ExaminerRequest>>,
}

impl MockExaminer {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful answer
    pub fn queue_answer(&self, answer: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(ExaminerReply {
            answer: answer.into(),
            marks: None,
        }));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: ExaminerError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<ExaminerRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockExaminer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExaminerClient for MockExaminer {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExaminerError::network("No mock reply queued")))
    }
}

// ============================================================================
// Gated Examiner (holds each request until released)
// ============================================================================

pub struct GatedExaminer {
    pub inner: MockExaminer,
    /// Notified when a request reaches the examiner
    pub started: Arc<Notify>,
    gate: Arc<Notify>,
}

impl GatedExaminer {
    pub fn new() -> Self {
        Self {
            inner: MockExaminer::new(),
            started: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Let one held (or the next) request through
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ExaminerClient for GatedExaminer {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        self.started.notify_one();
        self.gate.notified().await;
        self.inner.ask(request).await
    }
}

// ============================================================================
// Stalled Examiner (never answers)
// ============================================================================

pub struct StalledExaminer;

#[async_trait]
impl ExaminerClient for StalledExaminer {
    async fn ask(&self, _request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        std::future::pending().await
    }
}

// ============================================================================
// Test Controller
// ============================================================================

/// A running controller plus shared access to its examiner
pub struct TestController<E: ExaminerClient + 'static> {
    pub handle: ControllerHandle,
    pub examiner: Arc<E>,
}

impl<E: ExaminerClient + 'static> TestController<E> {
    pub fn start(examiner: E) -> Self {
        let examiner = Arc::new(examiner);
        let handle = ConversationController::spawn(
            examiner.clone(),
            Arc::new(InMemoryTranscript::new()),
            Session::new(),
        );
        Self { handle, examiner }
    }

    /// Select a tier, type a question, and submit it
    pub async fn ask(&self, marks: MarkTier, question: &str) -> SubmitOutcome {
        self.handle.select_marks(marks).await.unwrap();
        self.handle.update_draft(question).await.unwrap();
        self.handle.submit().await.unwrap()
    }

    /// Wait for the in-flight request (if any) to resolve
    pub async fn settle(&self, timeout: Duration) -> Session {
        tokio::time::timeout(timeout, self.handle.wait_idle())
            .await
            .expect("conversation should return to idle")
            .unwrap()
    }
}
