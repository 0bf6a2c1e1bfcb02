//! Environment configuration

use crate::marks::{InvalidMarks, MarkTier};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("EXAMINER_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("EXAMINER_DEFAULT_MARKS: {0}")]
    InvalidMarks(#[from] InvalidMarks),
}

/// Settings for reaching the examiner backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExaminerConfig {
    /// Base URL of the examiner backend, without trailing slash
    pub api_url: String,
    /// Transport timeout; `None` waits for the backend indefinitely
    pub timeout: Option<Duration>,
    /// Tier preselected at start-up
    pub default_marks: Option<MarkTier>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ExaminerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            default_marks: None,
            log_json: false,
        }
    }
}

impl ExaminerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests inject a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("EXAMINER_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup("EXAMINER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                (secs > 0).then_some(Duration::from_secs(secs))
            }
            None => None,
        };

        let default_marks = lookup("EXAMINER_DEFAULT_MARKS")
            .map(|raw| raw.parse::<MarkTier>())
            .transpose()?;

        let log_json = lookup("EXAMINER_LOG_JSON").is_some_and(|v| v == "1" || v == "true");

        Ok(Self {
            api_url,
            timeout,
            default_marks,
            log_json,
        })
    }
}
