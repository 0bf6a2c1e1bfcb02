//! Plain-text formatting of transcript turns for the terminal front end

use crate::blocks::DisplayBlock;
use crate::marks::MarkTier;
use crate::transcript::{Role, Turn};

const INDENT: &str = "    ";

/// Lines for one transcript turn
pub fn render_turn(turn: &Turn) -> Vec<String> {
    match (turn.role, turn.blocks()) {
        (Role::User, _) => {
            let mut lines = vec![format!("You [{} marks]", turn.marks)];
            lines.extend(turn.text.lines().map(|l| format!("{INDENT}{l}")));
            lines
        }
        (Role::Assistant, None) => vec![format!("! {}", turn.text)],
        (Role::Assistant, Some(blocks)) => {
            let mut lines = vec![format!("Examiner [{} marks]", turn.marks)];
            lines.extend(blocks.iter().flat_map(render_block));
            lines
        }
    }
}

/// Lines for one display block; marker text is trimmed here, not in the parser
pub fn render_block(block: &DisplayBlock) -> Vec<String> {
    match block {
        DisplayBlock::SectionHeader { label } => vec![format!("> {}", label.trim().to_uppercase())],
        DisplayBlock::EvidenceLine { text } => vec![format!("{INDENT}EVIDENCE: {}", text.trim())],
        DisplayBlock::ExplanationLine { text } => {
            vec![format!("{INDENT}EXPLANATION: {}", text.trim())]
        }
        DisplayBlock::Heading { text } => {
            let text = text.trim();
            vec![text.to_string(), "-".repeat(text.chars().count())]
        }
        DisplayBlock::Paragraph { text } => vec![text.clone()],
        DisplayBlock::Spacer => vec![String::new()],
        DisplayBlock::AuditNote { text } => {
            let mut lines = vec![String::new(), "Examiner audit:".to_string()];
            lines.extend(text.lines().map(|l| format!("{INDENT}{l}")));
            lines
        }
    }
}

/// Marking criteria for every tier, current selection flagged
pub fn render_rubric(selected: Option<MarkTier>) -> Vec<String> {
    MarkTier::ALL
        .iter()
        .map(|&tier| {
            let rubric = tier.rubric();
            let flag = if selected == Some(tier) { '*' } else { ' ' };
            format!(
                "{flag} {tier:>2} marks  {} ({}-{} words). {}",
                rubric.structure, rubric.word_range.0, rubric.word_range.1, rubric.summary
            )
        })
        .collect()
}
