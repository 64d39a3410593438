//! Render instructions.
//!
//! A page is described as an ordered list of [`Instruction`]s addressed to
//! named [`Slot`]s. Hosts decide how a slot looks; the instructions only say
//! what goes in it.

use studypath_core::model::Level;

/// A named region of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    PageTitle,
    LevelBadge,
    Motivation,
    Concepts,
    Theory,
    Formulas,
    Examples,
    Takeaways,
    CommonMistakes,
    Applications,
    ExamTips,
    IndustryInsight,
    /// The module tree of a roadmap.
    Roadmap,
    /// One level group inside the roadmap.
    Level(Level),
    Quiz,
    Score,
    /// Next-attempt difficulty note on graded bank quizzes.
    DifficultyHint,
    Progression,
    Summary,
    SummaryTitle,
    KeyIdeas,
    ImportantFormulas,
    ExamTraps,
    ExamTip,
    SummaryText,
    KeyConcepts,
    Intuition,
    WorkedExamples,
    SummaryMistakes,
    ExamTakeaways,
    RealWorldApplications,
    CardFront,
    CardBack,
    CardPosition,
}

impl Slot {
    /// Stable identifier, used as the HTML element id.
    pub fn id(self) -> String {
        let id = match self {
            Slot::PageTitle => "page-title",
            Slot::LevelBadge => "level-badge",
            Slot::Motivation => "motivation",
            Slot::Concepts => "concepts",
            Slot::Theory => "theory",
            Slot::Formulas => "formulas",
            Slot::Examples => "examples",
            Slot::Takeaways => "takeaways",
            Slot::CommonMistakes => "common-mistakes",
            Slot::Applications => "applications",
            Slot::ExamTips => "exam-tips",
            Slot::IndustryInsight => "industry-insight",
            Slot::Roadmap => "roadmap",
            Slot::Level(level) => return format!("{level}-nodes"),
            Slot::Quiz => "quiz",
            Slot::Score => "quiz-score",
            Slot::DifficultyHint => "difficulty-hint",
            Slot::Progression => "progression",
            Slot::Summary => "summary",
            Slot::SummaryTitle => "summary-title",
            Slot::KeyIdeas => "key-ideas",
            Slot::ImportantFormulas => "important-formulas",
            Slot::ExamTraps => "exam-traps",
            Slot::ExamTip => "exam-tip",
            Slot::SummaryText => "summary-text",
            Slot::KeyConcepts => "key-concepts",
            Slot::Intuition => "intuition",
            Slot::WorkedExamples => "worked-examples",
            Slot::SummaryMistakes => "summary-mistakes",
            Slot::ExamTakeaways => "exam-takeaways",
            Slot::RealWorldApplications => "real-world-applications",
            Slot::CardFront => "card-front",
            Slot::CardBack => "card-back",
            Slot::CardPosition => "card-position",
        };
        id.to_string()
    }

    /// Section heading, for slots that carry one.
    pub fn heading(self) -> Option<String> {
        let heading = match self {
            Slot::Concepts => "Concept Overview",
            Slot::Theory => "Intuition & Theory",
            Slot::Formulas => "Mathematical Formulation",
            Slot::Examples | Slot::WorkedExamples => "Worked Examples",
            Slot::Takeaways => "Key Takeaways",
            Slot::CommonMistakes | Slot::SummaryMistakes => "Common Mistakes",
            Slot::Applications => "Applications",
            Slot::ExamTips => "Exam Tips",
            Slot::IndustryInsight => "Industry Insight",
            Slot::Level(level) => return Some(capitalize(level.as_str())),
            Slot::KeyIdeas => "Key Ideas",
            Slot::ImportantFormulas => "Important Formulas",
            Slot::ExamTraps => "Common Exam Traps",
            Slot::ExamTip => "Exam Tip",
            Slot::SummaryText => "Summary",
            Slot::KeyConcepts => "Key Concepts",
            Slot::Intuition => "Intuition",
            Slot::ExamTakeaways => "Exam Takeaways",
            Slot::RealWorldApplications => "Real-World Applications",
            _ => return None,
        };
        Some(heading.to_string())
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An interactive control on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SubmitQuiz,
    RetryQuiz,
    SummaryTrigger,
    NextCard,
}

impl Control {
    pub fn id(self) -> &'static str {
        match self {
            Control::SubmitQuiz => "submit-quiz",
            Control::RetryQuiz => "retry-quiz",
            Control::SummaryTrigger => "summary-trigger",
            Control::NextCard => "next-card",
        }
    }
}

/// A titled block with a body, used for formulas and worked examples.
/// `title` and `body` are markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub body: String,
    /// Plain-text annotations such as a difficulty tag.
    pub notes: Vec<String>,
}

/// How an option is marked after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMark {
    pub index: usize,
    pub text: String,
    pub chosen: bool,
    pub mark: Mark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

/// One question with its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    /// 1-based position in the quiz.
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionMark>,
    /// Inputs no longer accept changes.
    pub disabled: bool,
    pub feedback: Option<Feedback>,
}

/// A clickable module in the roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapNode {
    pub level: Level,
    pub module_id: String,
    pub module_name: String,
    pub best_score: Option<u8>,
    pub passed: bool,
}

/// A single step of page construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Plain text; hosts escape it.
    SetText { slot: Slot, text: String },
    /// Markup produced by [`crate::markup::format_text`].
    SetMarkup { slot: Slot, html: String },
    /// A bulleted list of plain-text items.
    SetList { slot: Slot, items: Vec<String> },
    SetEntries { slot: Slot, entries: Vec<Entry> },
    Show(Slot),
    Hide(Slot),
    Question(QuestionBlock),
    RoadmapNode(RoadmapNode),
    /// A blocking message the user must acknowledge.
    Alert(String),
    /// An error shown in place of content that failed to load.
    ErrorBanner(String),
    Control {
        control: Control,
        enabled: bool,
        label: String,
    },
}

impl Instruction {
    pub fn text(slot: Slot, text: impl Into<String>) -> Self {
        Instruction::SetText {
            slot,
            text: text.into(),
        }
    }

    pub fn list(slot: Slot, items: Vec<String>) -> Self {
        Instruction::SetList { slot, items }
    }

    /// The slot this instruction fills, if any.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Instruction::SetText { slot, .. }
            | Instruction::SetMarkup { slot, .. }
            | Instruction::SetList { slot, .. }
            | Instruction::SetEntries { slot, .. }
            | Instruction::Show(slot)
            | Instruction::Hide(slot) => Some(*slot),
            Instruction::Question(_) => Some(Slot::Quiz),
            Instruction::RoadmapNode(node) => Some(Slot::Level(node.level)),
            Instruction::Alert(_) | Instruction::ErrorBanner(_) | Instruction::Control { .. } => {
                None
            }
        }
    }
}
