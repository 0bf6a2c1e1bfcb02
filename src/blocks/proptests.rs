//! Property-based tests for the block parser
//!
//! - Text without the audit marker never yields an audit note
//! - Non-spacer blocks account for every non-empty line, in order
//! - With the marker, exactly one audit note comes last, holding the trimmed tail
//! - Parsing is deterministic

use super::*;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A single line drawn from the examiner vocabulary or free text
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 ,.]{1,40}",
        "[a-zA-Z ]{0,30}".prop_map(|t| format!("POINT: {t}")),
        (1u32..20, "[a-zA-Z ]{0,30}").prop_map(|(n, t)| format!("REASON {n}: {t}")),
        "[a-zA-Z0-9 ]{0,30}".prop_map(|t| format!("EVIDENCE: {t}")),
        "[a-zA-Z ]{0,30}".prop_map(|t| format!("explanation:{t}")),
        "[a-zA-Z ]{0,30}".prop_map(|t| format!("### {t}")),
        Just("FINAL JUDGEMENT:".to_string()),
        Just("Agree Section:".to_string()),
    ]
}

fn arb_body() -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_line(), 0..20).prop_map(|lines| lines.join("\n"))
}

/// Audit tail that may repeat the marker verbatim
fn arb_note() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ./\n]{0,30}",
            Just(AUDIT_MARKER.to_string()),
        ],
        0..4,
    )
    .prop_map(|parts| parts.concat())
}

fn block_text(block: &DisplayBlock) -> Option<&str> {
    match block {
        DisplayBlock::SectionHeader { label } => Some(label.as_str()),
        DisplayBlock::EvidenceLine { text }
        | DisplayBlock::ExplanationLine { text }
        | DisplayBlock::Heading { text }
        | DisplayBlock::Paragraph { text }
        | DisplayBlock::AuditNote { text } => Some(text.as_str()),
        DisplayBlock::Spacer => None,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn no_marker_means_no_audit_note(body in arb_body()) {
        let blocks = parse_blocks(&body);
        let has_note = blocks.iter().any(|b| matches!(b, DisplayBlock::AuditNote { .. }));
        prop_assert!(!has_note);
    }

    #[test]
    fn one_block_per_line_and_spacers_match_blank_lines(body in arb_body()) {
        let blocks = parse_blocks(&body);
        let lines: Vec<&str> = body.lines().collect();
        prop_assert_eq!(blocks.len(), lines.len());

        for (block, line) in blocks.iter().zip(&lines) {
            prop_assert_eq!(line.is_empty(), *block == DisplayBlock::Spacer);
            // Stripped content is always a suffix of its source line
            if let Some(text) = block_text(block) {
                prop_assert!(line.ends_with(text), "{:?} is not a suffix of {:?}", text, line);
            }
        }
    }

    #[test]
    fn marker_yields_single_trailing_note(body in arb_body(), note in arb_note()) {
        let text = format!("{body}{AUDIT_MARKER}{note}");
        let blocks = parse_blocks(&text);

        let audits = blocks
            .iter()
            .filter(|b| matches!(b, DisplayBlock::AuditNote { .. }))
            .count();
        prop_assert_eq!(audits, 1);
        let expected_note = DisplayBlock::audit_note(note.trim());
        prop_assert_eq!(blocks.last(), Some(&expected_note));
        let plain = parse_blocks(&body);
        prop_assert_eq!(&blocks[..blocks.len() - 1], plain.as_slice());
    }

    #[test]
    fn parsing_is_deterministic(body in arb_body(), note in proptest::option::of(arb_note())) {
        let text = match note {
            Some(note) => format!("{body}{AUDIT_MARKER}{note}"),
            None => body,
        };
        prop_assert_eq!(parse_blocks(&text), parse_blocks(&text));
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        let _ = parse_blocks(&text);
    }
}
