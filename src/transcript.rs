//! Conversation transcript
//!
//! The transcript is append-only: turns are never edited or removed for the
//! lifetime of a session.

use crate::blocks::{parse_blocks, DisplayBlock};
use crate::marks::MarkTier;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    /// The user's question, or the examiner's raw answer text
    pub text: String,
    /// Tier frozen at submission time, shared by both turns of a pair
    pub marks: MarkTier,
    /// Set only on assistant turns synthesized after a failed request
    #[serde(default)]
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
impl Turn {
    pub fn user(text: impl Into<String>, marks: MarkTier) -> Self {
        Self::new(Role::User, text.into(), marks, false)
    }

    pub fn assistant(text: impl Into<String>, marks: MarkTier) -> Self {
        Self::new(Role::Assistant, text.into(), marks, false)
    }

    pub fn assistant_error(text: impl Into<String>, marks: MarkTier) -> Self {
        Self::new(Role::Assistant, text.into(), marks, true)
    }
}

impl Turn {
    pub fn new(role: Role, text: String, marks: MarkTier, is_error: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            marks,
            is_error,
            created_at: Utc::now(),
        }
    }

    /// Structured blocks for an examiner answer.
    ///
    /// Only successful assistant turns carry the marker vocabulary; user
    /// questions and error turns return `None` and are shown verbatim.
    pub fn blocks(&self) -> Option<Vec<DisplayBlock>> {
        match self.role {
            Role::Assistant if !self.is_error => Some(parse_blocks(&self.text)),
            _ => None,
        }
    }
}

/// Append-only storage for transcript turns
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a turn at the end of the transcript
    async fn append(&self, turn: Turn);

    /// All turns in creation order
    async fn turns(&self) -> Vec<Turn>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Transcript kept in memory for the lifetime of a session
#[derive(Debug, Default)]
pub struct InMemoryTranscript {
    turns: RwLock<Vec<Turn>>,
}

impl InMemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscript {
    async fn append(&self, turn: Turn) {
        self.turns.write().await.push(turn);
    }

    async fn turns(&self) -> Vec<Turn> {
        self.turns.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.turns.read().await.len()
    }
}
