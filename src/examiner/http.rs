//! HTTP examiner backend
//!
//! Contract: form-encoded `POST {base}/ask-ai` with fields `query` and
//! `marks`, answered by a JSON object carrying at least `answer`.

use super::{ExaminerClient, ExaminerError, ExaminerReply, ExaminerRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const ASK_PATH: &str = "/ask-ai";

/// Examiner reached over HTTP
pub struct HttpExaminer {
    client: Client,
    endpoint: String,
}

impl HttpExaminer {
    /// `timeout` bounds the whole request; `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ExaminerError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ExaminerError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}{ASK_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExaminerClient for HttpExaminer {
    async fn ask(&self, request: &ExaminerRequest) -> Result<ExaminerReply, ExaminerError> {
        let marks = request.marks.to_string();
        let form = [("query", request.query.as_str()), ("marks", marks.as_str())];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExaminerError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    ExaminerError::network(format!("Connection failed: {e}"))
                } else {
                    ExaminerError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExaminerError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ExaminerError::status(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str::<ExaminerReply>(&body).map_err(|e| {
            ExaminerError::protocol(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}
