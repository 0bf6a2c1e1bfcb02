//! Structured transcript parser
//!
//! Turns an examiner answer into an ordered list of typed display blocks.
//! The examiner writes a small line-oriented vocabulary (`POINT:`,
//! `EVIDENCE:`, `EXPLANATION:`, ...) followed by an optional audit footer
//! introduced by [`AUDIT_MARKER`].
//!
//! Parsing is a pure function of the text: no state survives between calls
//! and no state is carried from one line to the next. Unknown lines degrade
//! to [`DisplayBlock::Paragraph`], so vocabulary drift on the examiner side
//! never fails a render.

#[cfg(test)]
mod proptests;

use regex::Regex;
use std::sync::LazyLock;

/// Delimiter between the answer body and the examiner's self-audit
pub const AUDIT_MARKER: &str = "[EXAMINER AUDIT]";

const EVIDENCE_MARKER: &str = "EVIDENCE:";
const EXPLANATION_MARKER: &str = "EXPLANATION:";
const HEADING_PREFIX: &str = "###";

/// Structural section markers, matched at the start of a line
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:REASON \d+:|POINT:|INTRODUCTION:|AGREE SECTION:|DISAGREE SECTION:|FINAL JUDGEMENT:)",
    )
    .expect("section marker pattern is valid")
});

/// A classified unit of examiner output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// Section marker line, kept verbatim as the label
    SectionHeader { label: String },
    EvidenceLine { text: String },
    ExplanationLine { text: String },
    /// Markdown-style `###` heading
    Heading { text: String },
    Paragraph { text: String },
    /// Blank line placeholder
    Spacer,
    /// Examiner self-audit; at most one, always last
    AuditNote { text: String },
}

impl DisplayBlock {
    pub fn section_header(label: impl Into<String>) -> Self {
        DisplayBlock::SectionHeader {
            label: label.into(),
        }
    }

    pub fn evidence(text: impl Into<String>) -> Self {
        DisplayBlock::EvidenceLine { text: text.into() }
    }

    pub fn explanation(text: impl Into<String>) -> Self {
        DisplayBlock::ExplanationLine { text: text.into() }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        DisplayBlock::Heading { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        DisplayBlock::Paragraph { text: text.into() }
    }

    pub fn audit_note(text: impl Into<String>) -> Self {
        DisplayBlock::AuditNote { text: text.into() }
    }
}

/// Parse an examiner answer into display blocks.
///
/// The first [`AUDIT_MARKER`] splits the text: everything after it, trimmed,
/// becomes a single trailing [`DisplayBlock::AuditNote`] (later occurrences of
/// the marker are part of the note). The body before it is classified line by
/// line with [`classify_line`].
pub fn parse_blocks(text: &str) -> Vec<DisplayBlock> {
    let (body, audit) = match text.split_once(AUDIT_MARKER) {
        Some((body, note)) => (body, Some(note.trim())),
        None => (text, None),
    };

    let mut blocks: Vec<DisplayBlock> = body.lines().map(classify_line).collect();
    if let Some(note) = audit {
        blocks.push(DisplayBlock::audit_note(note));
    }
    blocks
}

/// Classify one body line. First match wins:
/// section marker, `EVIDENCE:`, `EXPLANATION:`, `###`, paragraph, spacer.
pub fn classify_line(line: &str) -> DisplayBlock {
    if SECTION_MARKER.is_match(line) {
        return DisplayBlock::section_header(line);
    }
    if let Some(rest) = strip_marker(line, EVIDENCE_MARKER) {
        return DisplayBlock::evidence(rest);
    }
    if let Some(rest) = strip_marker(line, EXPLANATION_MARKER) {
        return DisplayBlock::explanation(rest);
    }
    if let Some(rest) = line.strip_prefix(HEADING_PREFIX) {
        return DisplayBlock::heading(consume_separator(rest));
    }
    if line.is_empty() {
        DisplayBlock::Spacer
    } else {
        DisplayBlock::paragraph(line)
    }
}

/// Case-insensitive prefix strip for ASCII markers.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    if !head.eq_ignore_ascii_case(marker) {
        return None;
    }
    line.get(marker.len()..).map(consume_separator)
}

/// A marker owns the single space that separates it from its text;
/// any further whitespace belongs to the text.
fn consume_separator(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
