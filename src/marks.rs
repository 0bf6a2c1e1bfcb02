//! Mark allocation tiers
//!
//! A question is graded under exactly one tier. The tier only selects the
//! rubric shown to the user and the number sent to the examiner backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Mark allocation for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MarkTier {
    Four,
    Seven,
    Fourteen,
}

/// Rubric text and structure hints for a tier (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rubric {
    pub structure: &'static str,
    pub word_range: (u32, u32),
    pub summary: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid mark allocation {0:?} (expected 4, 7 or 14)")]
pub struct InvalidMarks(pub String);

impl MarkTier {
    pub const ALL: [MarkTier; 3] = [MarkTier::Four, MarkTier::Seven, MarkTier::Fourteen];

    /// Numeric mark value sent on the wire
    pub fn value(self) -> u8 {
        match self {
            MarkTier::Four => 4,
            MarkTier::Seven => 7,
            MarkTier::Fourteen => 14,
        }
    }

    pub fn rubric(self) -> Rubric {
        match self {
            MarkTier::Four => Rubric {
                structure: "2 PEEL paragraphs",
                word_range: (110, 150),
                summary: "Requires 2 PEEL paragraphs. Factual depth (dates/names) is critical.",
            },
            MarkTier::Seven => Rubric {
                structure: "3 PEEL paragraphs",
                word_range: (220, 260),
                summary: "3 Analytical paragraphs. Focused on consequences and impact.",
            },
            MarkTier::Fourteen => Rubric {
                structure: "Introduction, agree, disagree, final judgement",
                word_range: (450, 550),
                summary: "Full evaluation essay. Balanced debate + sustained judgement.",
            },
        }
    }
}

impl TryFrom<u8> for MarkTier {
    type Error = InvalidMarks;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(MarkTier::Four),
            7 => Ok(MarkTier::Seven),
            14 => Ok(MarkTier::Fourteen),
            other => Err(InvalidMarks(other.to_string())),
        }
    }
}

impl From<MarkTier> for u8 {
    fn from(tier: MarkTier) -> Self {
        tier.value()
    }
}

impl FromStr for MarkTier {
    type Err = InvalidMarks;

    /// Accepts `7` as well as the `7M` / `7m` labels used by the tier picker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix(['m', 'M'])
            .unwrap_or(trimmed);
        // `u8::from_str` would also take a leading `+`
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidMarks(s.to_string()));
        }
        digits
            .parse::<u8>()
            .map_err(|_| InvalidMarks(s.to_string()))
            .and_then(MarkTier::try_from)
            .map_err(|_| InvalidMarks(s.to_string()))
    }
}

impl fmt::Display for MarkTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}
