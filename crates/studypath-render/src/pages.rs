//! Page renderers.
//!
//! Each function maps a content record (and whatever page state applies) to
//! the instructions that build the page. Slots that a page always shows are
//! always emitted, with a placeholder when the content is missing.

use studypath_core::error::StudyError;
use studypath_core::flashcards::FlashcardDeck;
use studypath_core::model::{Curriculum, Formula, Level, Module, WorkedExample};
use studypath_core::progress::ProgressRecord;
use studypath_core::progression::{ProgressionOutcome, PASS_THRESHOLD};
use studypath_core::quiz::{Grade, QuizSession};
use studypath_core::summary::{GeneratedSummary, StaticSummary};

use crate::instruction::{
    capitalize, Control, Entry, Feedback, Instruction, Mark, OptionMark, QuestionBlock,
    RoadmapNode, Slot,
};
use crate::markup::format_text;

const MOTIVATION_PLACEHOLDER: &str = "Master this concept to unlock advanced applications.";
const CONCEPTS_PLACEHOLDER: &str = "Core fundamental topic.";
const THEORY_PLACEHOLDER: &str = "No theory content available.";
const FORMULAS_PLACEHOLDER: &str = "No formulation required.";
const EXAMPLES_PLACEHOLDER: &str = "No example provided.";
const TAKEAWAYS_PLACEHOLDER: &str = "No key takeaways listed.";
const SUMMARY_FALLBACK: &str = "No summary content available for this module.";

/// Characters of a worked-example solution shown in a generated summary.
const SOLUTION_PREVIEW_CHARS: usize = 150;

/// Human-readable subject name.
pub fn subject_display_name(slug: &str) -> String {
    match slug {
        "aiml" => "AI & Machine Learning".to_string(),
        "programming_c" => "C Programming".to_string(),
        other => capitalize(other),
    }
}

fn error_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<StudyError>() {
        Some(e) => e.user_message(),
        None => format!("{err:#}"),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|t| !t.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

/// Render a subject roadmap: the three levels in fixed order, each with its
/// modules in source order. With a progress record, nodes at or above the
/// pass threshold are marked passed. A failed fetch replaces the tree with an
/// error banner.
pub fn render_roadmap(
    subject: &str,
    curriculum: Result<&Curriculum, &anyhow::Error>,
    progress: Option<&ProgressRecord>,
) -> Vec<Instruction> {
    let mut out = vec![Instruction::text(
        Slot::PageTitle,
        format!("{} Roadmap", subject_display_name(subject)),
    )];

    let curriculum = match curriculum {
        Ok(c) => c,
        Err(e) => {
            out.push(Instruction::Hide(Slot::Roadmap));
            out.push(Instruction::ErrorBanner(format!(
                "Error loading roadmap data. {}",
                error_text(e)
            )));
            return out;
        }
    };

    out.push(Instruction::Show(Slot::Roadmap));
    for level in Level::ALL {
        let slot = Slot::Level(level);
        out.push(Instruction::text(slot, capitalize(level.as_str())));
        for m in curriculum.modules(level) {
            let best_score =
                progress.and_then(|p| p.best_score(&curriculum.subject, level, &m.module_id));
            out.push(Instruction::RoadmapNode(RoadmapNode {
                level,
                module_id: m.module_id.clone(),
                module_name: m.module_name.clone(),
                best_score,
                passed: best_score.is_some_and(|s| s >= PASS_THRESHOLD),
            }));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

fn formula_entry(f: &Formula) -> Entry {
    Entry {
        title: format_text(&f.expression),
        body: format_text(&f.explanation),
        notes: Vec::new(),
    }
}

fn example_entry(e: &WorkedExample) -> Entry {
    let mut notes = Vec::new();
    if let Some(d) = non_blank(e.difficulty.as_deref()) {
        notes.push(format!("Difficulty: {d}"));
    }
    if let Some(a) = non_blank(e.final_answer.as_deref()) {
        notes.push(format!("Final answer: {a}"));
    }
    Entry {
        title: format!("<strong>Q:</strong> {}", format_text(&e.problem)),
        body: format!("<strong>A:</strong> {}", format_text(&e.solution)),
        notes,
    }
}

/// A list slot that is shown only when it has items.
fn optional_list(out: &mut Vec<Instruction>, slot: Slot, items: &[String]) {
    if items.is_empty() {
        out.push(Instruction::Hide(slot));
    } else {
        out.push(Instruction::list(slot, items.to_vec()));
        out.push(Instruction::Show(slot));
    }
}

/// Render a module page. Title, level badge, motivation, concepts, theory,
/// formulas, examples and takeaways are always present.
pub fn render_module(module: &Module) -> Vec<Instruction> {
    let mut out = Vec::new();

    let title = if module.title.trim().is_empty() {
        &module.module_id
    } else {
        &module.title
    };
    out.push(Instruction::text(Slot::PageTitle, title.as_str()));
    out.push(Instruction::text(
        Slot::LevelBadge,
        module.level.map(|l| capitalize(l.as_str())).unwrap_or_default(),
    ));
    out.push(Instruction::text(
        Slot::Motivation,
        non_blank(module.motivation.as_deref()).unwrap_or(MOTIVATION_PLACEHOLDER),
    ));

    let concepts = if module.concepts.is_empty() {
        vec![CONCEPTS_PLACEHOLDER.to_string()]
    } else {
        module.concepts.clone()
    };
    out.push(Instruction::list(Slot::Concepts, concepts));

    out.push(match non_blank(module.theory.as_deref()) {
        Some(theory) => Instruction::SetMarkup {
            slot: Slot::Theory,
            html: format_text(theory),
        },
        None => Instruction::text(Slot::Theory, THEORY_PLACEHOLDER),
    });

    out.push(if module.formulas.is_empty() {
        Instruction::text(Slot::Formulas, FORMULAS_PLACEHOLDER)
    } else {
        Instruction::SetEntries {
            slot: Slot::Formulas,
            entries: module.formulas.iter().map(formula_entry).collect(),
        }
    });

    out.push(if module.examples.is_empty() {
        Instruction::text(Slot::Examples, EXAMPLES_PLACEHOLDER)
    } else {
        Instruction::SetEntries {
            slot: Slot::Examples,
            entries: module.examples.iter().map(example_entry).collect(),
        }
    });

    out.push(if module.takeaways.is_empty() {
        Instruction::text(Slot::Takeaways, TAKEAWAYS_PLACEHOLDER)
    } else {
        Instruction::list(Slot::Takeaways, module.takeaways.clone())
    });

    optional_list(&mut out, Slot::CommonMistakes, &module.common_mistakes);
    optional_list(&mut out, Slot::Applications, &module.applications);
    optional_list(&mut out, Slot::ExamTips, &module.exam_tips);
    match non_blank(module.industry_insight.as_deref()) {
        Some(insight) => {
            out.push(Instruction::text(Slot::IndustryInsight, insight));
            out.push(Instruction::Show(Slot::IndustryInsight));
        }
        None => out.push(Instruction::Hide(Slot::IndustryInsight)),
    }

    out
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// Render an open quiz attempt. Options already chosen are shown selected.
pub fn render_quiz(session: &QuizSession) -> Vec<Instruction> {
    let mut out = vec![
        Instruction::Show(Slot::Quiz),
        Instruction::text(Slot::Score, ""),
        Instruction::Hide(Slot::Progression),
    ];
    for (i, (q, answer)) in session
        .quiz()
        .questions
        .iter()
        .zip(session.answers())
        .enumerate()
    {
        out.push(Instruction::Question(QuestionBlock {
            number: i + 1,
            text: q.question.clone(),
            options: q
                .options
                .iter()
                .enumerate()
                .map(|(index, text)| OptionMark {
                    index,
                    text: text.clone(),
                    chosen: *answer == Some(index),
                    mark: Mark::None,
                })
                .collect(),
            disabled: false,
            feedback: None,
        }));
    }
    out.push(Instruction::Control {
        control: Control::SubmitQuiz,
        enabled: true,
        label: "Submit Quiz".into(),
    });
    out.push(Instruction::Control {
        control: Control::RetryQuiz,
        enabled: false,
        label: "Retry Quiz".into(),
    });
    out
}

/// Score at or above which a bank quiz gets harder next time.
pub const DIFFICULTY_UP_THRESHOLD: u8 = 80;
/// Score below which a bank quiz gets easier next time.
pub const DIFFICULTY_DOWN_THRESHOLD: u8 = 50;

fn difficulty_hint(percentage: u8) -> Option<&'static str> {
    if percentage >= DIFFICULTY_UP_THRESHOLD {
        Some("Difficulty increased next time!")
    } else if percentage < DIFFICULTY_DOWN_THRESHOLD {
        Some("Difficulty will be reduced next time.")
    } else {
        None
    }
}

fn feedback_message(correct: bool, explanation: &str) -> String {
    let verdict = if correct { "Correct!" } else { "Incorrect." };
    if explanation.trim().is_empty() {
        verdict.to_string()
    } else {
        format!("{verdict} {explanation}")
    }
}

/// Render a graded attempt: chosen and correct options marked, inputs
/// disabled, per-question feedback and the score line.
pub fn render_graded_quiz(session: &QuizSession, grade: &Grade) -> Vec<Instruction> {
    let mut out = vec![Instruction::Show(Slot::Quiz)];
    for (i, (q, outcome)) in session
        .quiz()
        .questions
        .iter()
        .zip(&grade.outcomes)
        .enumerate()
    {
        let correct = outcome.is_correct();
        let options = q
            .options
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let mark = if index == outcome.correct {
                    Mark::Correct
                } else if index == outcome.chosen {
                    Mark::Wrong
                } else {
                    Mark::None
                };
                OptionMark {
                    index,
                    text: text.clone(),
                    chosen: index == outcome.chosen,
                    mark,
                }
            })
            .collect();
        out.push(Instruction::Question(QuestionBlock {
            number: i + 1,
            text: q.question.clone(),
            options,
            disabled: true,
            feedback: Some(Feedback {
                correct,
                message: feedback_message(correct, &q.explanation),
            }),
        }));
    }
    out.push(Instruction::text(
        Slot::Score,
        format!("Score: {}%", grade.percentage),
    ));
    if session.quiz().adaptive {
        if let Some(hint) = difficulty_hint(grade.percentage) {
            out.push(Instruction::text(Slot::DifficultyHint, hint));
        }
    }
    out.push(Instruction::Control {
        control: Control::SubmitQuiz,
        enabled: false,
        label: "Submit Quiz".into(),
    });
    out.push(Instruction::Control {
        control: Control::RetryQuiz,
        enabled: true,
        label: "Retry Quiz".into(),
    });
    out
}

/// Render the message shown after a graded quiz.
pub fn render_progression(outcome: ProgressionOutcome, level: Level) -> Vec<Instruction> {
    let message = match outcome {
        ProgressionOutcome::NeedsReview => format!(
            "Score below {PASS_THRESHOLD}%. Please review the weak topics in this module and retry."
        ),
        ProgressionOutcome::ModulePassed => {
            "Module Passed! Good job! Return to the roadmap to continue.".to_string()
        }
        ProgressionOutcome::LevelComplete => format!(
            "LEVEL COMPLETE! You have passed all modules in {level}. Return to the roadmap to start the next level."
        ),
    };
    vec![
        Instruction::Show(Slot::Progression),
        Instruction::text(Slot::Progression, message),
    ]
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

fn non_empty_list(out: &mut Vec<Instruction>, slot: Slot, items: &[String]) {
    if !items.is_empty() {
        out.push(Instruction::list(slot, items.to_vec()));
    }
}

/// Render a module's embedded summary. Empty subsections are skipped; with
/// nothing to show the fallback line is rendered instead.
pub fn render_static_summary(summary: Option<&StaticSummary>) -> Vec<Instruction> {
    let mut sections = Vec::new();
    if let Some(s) = summary {
        non_empty_list(&mut sections, Slot::KeyIdeas, &s.key_ideas);
        non_empty_list(&mut sections, Slot::ImportantFormulas, &s.important_formulas);
        non_empty_list(&mut sections, Slot::ExamTraps, &s.common_exam_traps);
        if let Some(tip) = non_blank(s.exam_tip.as_deref()) {
            sections.push(Instruction::text(Slot::ExamTip, tip));
        }
    }

    let mut out = vec![Instruction::Show(Slot::Summary)];
    if sections.is_empty() {
        out.push(Instruction::text(Slot::Summary, SUMMARY_FALLBACK));
    } else {
        out.extend(sections);
    }
    out
}

/// First [`SOLUTION_PREVIEW_CHARS`] characters of a solution, with "..."
/// appended when anything was cut.
fn solution_preview(solution: &str) -> String {
    let mut chars = solution.char_indices();
    match chars.nth(SOLUTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &solution[..cut]),
        None => solution.to_string(),
    }
}

/// Render a summary produced by the summary backend.
pub fn render_generated_summary(summary: &GeneratedSummary) -> Vec<Instruction> {
    let mut out = vec![Instruction::Show(Slot::Summary)];

    let title = match (summary.module_name.trim(), summary.level.trim()) {
        ("", _) => None,
        (name, "") => Some(name.to_string()),
        (name, level) => Some(format!("{name} ({})", capitalize(level))),
    };
    if let Some(title) = title {
        out.push(Instruction::text(Slot::SummaryTitle, title));
    }
    if !summary.module_summary.trim().is_empty() {
        out.push(Instruction::SetMarkup {
            slot: Slot::SummaryText,
            html: format_text(&summary.module_summary),
        });
    }
    non_empty_list(&mut out, Slot::KeyConcepts, &summary.key_concepts);
    if !summary.intuition.trim().is_empty() {
        out.push(Instruction::SetMarkup {
            slot: Slot::Intuition,
            html: format_text(&summary.intuition),
        });
    }
    if !summary.worked_examples.is_empty() {
        out.push(Instruction::SetEntries {
            slot: Slot::WorkedExamples,
            entries: summary
                .worked_examples
                .iter()
                .map(|e| Entry {
                    title: format_text(&e.problem),
                    body: format_text(&solution_preview(&e.solution)),
                    notes: Vec::new(),
                })
                .collect(),
        });
    }
    non_empty_list(&mut out, Slot::SummaryMistakes, &summary.common_mistakes);
    non_empty_list(&mut out, Slot::ExamTakeaways, &summary.exam_takeaways);
    non_empty_list(
        &mut out,
        Slot::RealWorldApplications,
        &summary.real_world_applications,
    );

    if out.len() == 1 {
        out.push(Instruction::text(Slot::Summary, SUMMARY_FALLBACK));
    }
    out
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

/// Render the current card of a deck.
pub fn render_flashcard(deck: &FlashcardDeck) -> Vec<Instruction> {
    let card = deck.current();
    vec![
        Instruction::text(Slot::CardFront, card.front.as_str()),
        Instruction::text(Slot::CardBack, card.back.as_str()),
        Instruction::text(
            Slot::CardPosition,
            format!("Card {} of {}", deck.index() + 1, deck.len()),
        ),
        Instruction::Control {
            control: Control::NextCard,
            enabled: true,
            label: "Next".into(),
        },
    ]
}
