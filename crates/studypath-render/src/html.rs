//! HTML page serializer.
//!
//! Produces a self-contained HTML file with the CSS inlined. Every slot an
//! instruction list mentions becomes one `<section>`; hidden slots are kept in
//! the document with the `hidden` attribute.

use std::path::Path;

use anyhow::{Context, Result};

use crate::instruction::{Control, Entry, Instruction, Mark, QuestionBlock, RoadmapNode, Slot};
use crate::markup::html_escape;

struct Section {
    slot: Slot,
    hidden: bool,
    body: String,
}

fn section_mut(sections: &mut Vec<Section>, slot: Slot) -> &mut Section {
    let pos = match sections.iter().position(|s| s.slot == slot) {
        Some(pos) => pos,
        None => {
            sections.push(Section {
                slot,
                hidden: false,
                body: String::new(),
            });
            sections.len() - 1
        }
    };
    &mut sections[pos]
}

/// Render a full HTML page from render instructions.
pub fn to_html_page(title: &str, instructions: &[Instruction]) -> String {
    let mut sections: Vec<Section> = Vec::new();
    let mut banners = String::new();
    let mut controls = String::new();

    for ins in instructions {
        match ins {
            Instruction::Show(slot) => section_mut(&mut sections, *slot).hidden = false,
            Instruction::Hide(slot) => section_mut(&mut sections, *slot).hidden = true,
            Instruction::Alert(msg) => banners.push_str(&format!(
                "<div class=\"alert\" role=\"alert\">{}</div>\n",
                html_escape(msg)
            )),
            Instruction::ErrorBanner(msg) => {
                banners.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(msg)))
            }
            Instruction::Control {
                control,
                enabled,
                label,
            } => controls.push_str(&control_html(*control, *enabled, label)),
            other => {
                if let Some(slot) = other.slot() {
                    let fragment = fragment_html(other);
                    section_mut(&mut sections, slot).body.push_str(&fragment);
                }
            }
        }
    }

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>studypath: {}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&banners);
    for section in &sections {
        html.push_str(&format!(
            "<section id=\"{}\"{}>\n",
            section.slot.id(),
            if section.hidden { " hidden" } else { "" }
        ));
        if let Some(heading) = section.slot.heading() {
            html.push_str(&format!("<h2>{}</h2>\n", html_escape(&heading)));
        }
        html.push_str(&section.body);
        html.push_str("</section>\n");
    }
    if !controls.is_empty() {
        html.push_str("<nav class=\"controls\">\n");
        html.push_str(&controls);
        html.push_str("</nav>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML page to a file, creating parent directories.
pub fn write_html_page(path: &Path, title: &str, instructions: &[Instruction]) -> Result<()> {
    let html = to_html_page(title, instructions);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn fragment_html(ins: &Instruction) -> String {
    match ins {
        Instruction::SetText { slot, text } => match slot {
            Slot::PageTitle => format!("<h1>{}</h1>\n", html_escape(text)),
            Slot::LevelBadge => format!("<span class=\"badge\">{}</span>\n", html_escape(text)),
            // The level name is already the section heading.
            Slot::Level(_) => String::new(),
            _ => format!("<p>{}</p>\n", html_escape(text)),
        },
        Instruction::SetMarkup { html, .. } => format!("<div class=\"markup\">{html}</div>\n"),
        Instruction::SetList { items, .. } => {
            let mut out = String::from("<ul>\n");
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", html_escape(item)));
            }
            out.push_str("</ul>\n");
            out
        }
        Instruction::SetEntries { entries, .. } => entries.iter().map(entry_html).collect(),
        Instruction::Question(q) => question_html(q),
        Instruction::RoadmapNode(node) => node_html(node),
        _ => String::new(),
    }
}

fn entry_html(entry: &Entry) -> String {
    let mut out = String::from("<div class=\"entry\">\n");
    out.push_str(&format!("<div class=\"entry-title\">{}</div>\n", entry.title));
    out.push_str(&format!("<div class=\"entry-body\">{}</div>\n", entry.body));
    for note in &entry.notes {
        out.push_str(&format!("<p class=\"note\">{}</p>\n", html_escape(note)));
    }
    out.push_str("</div>\n");
    out
}

fn question_html(q: &QuestionBlock) -> String {
    let name = format!("q{}", q.number - 1);
    let mut out = format!(
        "<div class=\"question-card\" data-id=\"{}\">\n<div class=\"question-text\">{}. {}</div>\n<div class=\"options-group\">\n",
        q.number - 1,
        q.number,
        html_escape(&q.text)
    );
    for opt in &q.options {
        let class = match opt.mark {
            Mark::None => "option-label",
            Mark::Correct => "option-label correct-answer",
            Mark::Wrong => "option-label wrong-answer",
        };
        out.push_str(&format!(
            "<label class=\"{class}\"><input type=\"radio\" name=\"{name}\" value=\"{}\"{}{}> {}</label>\n",
            opt.index,
            if opt.chosen { " checked" } else { "" },
            if q.disabled { " disabled" } else { "" },
            html_escape(&opt.text)
        ));
    }
    out.push_str("</div>\n");
    if let Some(feedback) = &q.feedback {
        out.push_str(&format!(
            "<div class=\"feedback {}\">{}</div>\n",
            if feedback.correct { "correct" } else { "incorrect" },
            html_escape(&feedback.message)
        ));
    }
    out.push_str("</div>\n");
    out
}

fn node_html(node: &RoadmapNode) -> String {
    let score = node
        .best_score
        .map(|s| format!(" <span class=\"score\">{s}%</span>"))
        .unwrap_or_default();
    format!(
        "<div class=\"node-chip{}\" data-module=\"{}\" data-level=\"{}\">{}{score}</div>\n",
        if node.passed { " completed" } else { "" },
        html_escape(&node.module_id),
        node.level,
        html_escape(&node.module_name)
    )
}

fn control_html(control: Control, enabled: bool, label: &str) -> String {
    format!(
        "<button id=\"{}\"{}>{}</button>\n",
        control.id(),
        if enabled { "" } else { " disabled" },
        html_escape(label)
    )
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 60rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.badge { display: inline-block; padding: 0.2rem 0.6rem; border-radius: 999px; background: var(--border); }
.node-chip { display: inline-block; margin: 0.25rem; padding: 0.4rem 0.8rem; border: 1px solid var(--border); border-radius: 8px; }
.node-chip.completed, .correct-answer, .feedback.correct { background: var(--pass); }
.wrong-answer, .feedback.incorrect, .error, .alert { background: var(--fail); }
.question-card, .entry { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.option-label { display: block; padding: 0.25rem 0.5rem; }
.note { color: #6b7280; font-size: 0.9rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
.controls button { margin-right: 0.5rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{Feedback, OptionMark};
    use studypath_core::model::Level;

    #[test]
    fn hidden_slots_stay_in_document() {
        let html = to_html_page(
            "Sets",
            &[
                Instruction::text(Slot::PageTitle, "Sets <intro>"),
                Instruction::Hide(Slot::IndustryInsight),
                Instruction::list(Slot::Takeaways, vec!["a & b".into()]),
            ],
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Sets &lt;intro&gt;</h1>"));
        assert!(html.contains("<section id=\"industry-insight\" hidden>"));
        assert!(html.contains("<h2>Key Takeaways</h2>"));
        assert!(html.contains("<li>a &amp; b</li>"));
    }

    #[test]
    fn markup_is_not_escaped() {
        let html = to_html_page(
            "t",
            &[Instruction::SetMarkup {
                slot: Slot::Theory,
                html: "<strong>x</strong>".into(),
            }],
        );
        assert!(html.contains("<div class=\"markup\"><strong>x</strong></div>"));
    }

    #[test]
    fn graded_question_is_disabled_and_marked() {
        let html = to_html_page(
            "quiz",
            &[
                Instruction::Question(QuestionBlock {
                    number: 1,
                    text: "2 + 2?".into(),
                    options: vec![
                        OptionMark {
                            index: 0,
                            text: "4".into(),
                            chosen: false,
                            mark: Mark::Correct,
                        },
                        OptionMark {
                            index: 1,
                            text: "5".into(),
                            chosen: true,
                            mark: Mark::Wrong,
                        },
                    ],
                    disabled: true,
                    feedback: Some(Feedback {
                        correct: false,
                        message: "Incorrect. It is 4.".into(),
                    }),
                }),
                Instruction::Control {
                    control: Control::SubmitQuiz,
                    enabled: false,
                    label: "Submit Quiz".into(),
                },
            ],
        );
        assert!(html.contains("name=\"q0\" value=\"1\" checked disabled> 5"));
        assert!(html.contains("option-label correct-answer"));
        assert!(html.contains("<div class=\"feedback incorrect\">Incorrect. It is 4.</div>"));
        assert!(html.contains("<button id=\"submit-quiz\" disabled>Submit Quiz</button>"));
    }

    #[test]
    fn roadmap_nodes_group_under_levels() {
        let html = to_html_page(
            "roadmap",
            &[
                Instruction::text(Slot::Level(Level::Beginner), "Beginner"),
                Instruction::RoadmapNode(RoadmapNode {
                    level: Level::Beginner,
                    module_id: "sets".into(),
                    module_name: "Sets".into(),
                    best_score: Some(80),
                    passed: true,
                }),
                Instruction::ErrorBanner("boom".into()),
            ],
        );
        assert!(html.contains("<section id=\"beginner-nodes\">\n<h2>Beginner</h2>"));
        assert!(html.contains("node-chip completed"));
        assert!(html.contains("<span class=\"score\">80%</span>"));
        assert!(html.contains("<p class=\"error\">boom</p>"));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/page.html");
        write_html_page(&path, "t", &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<title>studypath: t</title>"));
    }
}
