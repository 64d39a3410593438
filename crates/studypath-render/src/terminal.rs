//! Plain-text serializer for terminals.

use std::collections::HashSet;

use crate::instruction::{Instruction, Mark, QuestionBlock, RoadmapNode, Slot};
use crate::markup::strip_tags;

/// Render instructions as terminal text. Tags are stripped, lists are
/// bulleted, and each headed slot gets its heading once.
pub fn to_text(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    let mut headed: HashSet<Slot> = HashSet::new();

    for ins in instructions {
        if let Some(slot) = ins.slot() {
            let has_content = !matches!(ins, Instruction::Show(_) | Instruction::Hide(_));
            if has_content && headed.insert(slot) {
                if let Some(heading) = slot.heading() {
                    out.push_str(&format!("\n{heading}\n{}\n", "-".repeat(heading.chars().count())));
                }
            }
        }

        match ins {
            Instruction::SetText { slot, text } => match slot {
                Slot::PageTitle => {
                    out.push_str(&format!("{text}\n{}\n", "=".repeat(text.chars().count())))
                }
                Slot::LevelBadge if !text.is_empty() => out.push_str(&format!("[{text}]\n")),
                Slot::Level(_) => {}
                _ if text.is_empty() => {}
                _ => out.push_str(&format!("{text}\n")),
            },
            Instruction::SetMarkup { html, .. } => {
                out.push_str(&strip_tags(html));
                out.push('\n');
            }
            Instruction::SetList { items, .. } => {
                for item in items {
                    out.push_str(&format!("  - {item}\n"));
                }
            }
            Instruction::SetEntries { entries, .. } => {
                for (i, entry) in entries.iter().enumerate() {
                    out.push_str(&format!("  {}. {}\n", i + 1, strip_tags(&entry.title)));
                    for line in strip_tags(&entry.body).lines() {
                        out.push_str(&format!("     {line}\n"));
                    }
                    for note in &entry.notes {
                        out.push_str(&format!("     ({note})\n"));
                    }
                }
            }
            Instruction::Question(q) => question_text(&mut out, q),
            Instruction::RoadmapNode(node) => node_text(&mut out, node),
            Instruction::Alert(msg) => out.push_str(&format!("! {msg}\n")),
            Instruction::ErrorBanner(msg) => out.push_str(&format!("Error: {msg}\n")),
            Instruction::Show(_) | Instruction::Hide(_) | Instruction::Control { .. } => {}
        }
    }
    out
}

fn question_text(out: &mut String, q: &QuestionBlock) {
    out.push_str(&format!("\n{}. {}\n", q.number, q.text));
    for opt in &q.options {
        let radio = if opt.chosen { "(*)" } else { "( )" };
        let mark = match opt.mark {
            Mark::None => "",
            Mark::Correct => "  <- correct",
            Mark::Wrong => "  <- your answer",
        };
        out.push_str(&format!("   {radio} {}) {}{mark}\n", opt.index, opt.text));
    }
    if let Some(feedback) = &q.feedback {
        out.push_str(&format!("   {}\n", feedback.message));
    }
}

fn node_text(out: &mut String, node: &RoadmapNode) {
    let check = if node.passed { "[x]" } else { "[ ]" };
    let score = node
        .best_score
        .map(|s| format!("  best {s}%"))
        .unwrap_or_default();
    out.push_str(&format!(
        "  {check} {} ({}){score}\n",
        node.module_name, node.module_id
    ));
}
