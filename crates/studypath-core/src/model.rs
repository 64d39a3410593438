//! Canonical data model for studypath.
//!
//! Every content source converts whatever JSON shape it reads into these
//! types (see [`crate::schema`]), so rendering and progression only ever see
//! one shape.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::summary::StaticSummary;

/// Difficulty tier of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in roadmap order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Difficulty bank used by question banks keyed by difficulty.
    pub fn difficulty(self) -> &'static str {
        match self {
            Level::Beginner => "easy",
            Level::Intermediate => "medium",
            Level::Advanced => "hard",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// The (subject, level, module) triple that identifies one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRef {
    pub subject: String,
    pub level: Level,
    pub module_id: String,
}

impl ModuleRef {
    pub fn new(subject: impl Into<String>, level: Level, module_id: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            level,
            module_id: module_id.into(),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.subject, self.level, self.module_id)
    }
}

/// One entry in a level's module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub module_id: String,
    pub module_name: String,
}

/// Subject → level → ordered module list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Curriculum {
    pub subject: String,
    #[serde(default)]
    pub levels: BTreeMap<Level, Vec<ModuleSummary>>,
}

impl Curriculum {
    /// Modules of a level in source order; empty when the level is absent.
    pub fn modules(&self, level: Level) -> &[ModuleSummary] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find a module summary by id within a level.
    pub fn find(&self, level: Level, module_id: &str) -> Option<&ModuleSummary> {
        self.modules(level).iter().find(|m| m.module_id == module_id)
    }

    /// Total number of modules across all levels.
    pub fn module_count(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }
}

/// A mathematical formula with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub expression: String,
    #[serde(default)]
    pub explanation: String,
}

/// A problem/solution pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub final_answer: Option<String>,
}

/// A multiple-choice question. `correct` always indexes into `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

/// The ordered questions of one module's quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub module_id: String,
    pub questions: Vec<Question>,
    /// Drawn from a difficulty bank, so graded results carry a difficulty hint.
    #[serde(default)]
    pub adaptive: bool,
}

/// A lesson unit within a subject and level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    pub module_id: String,
    pub subject: String,
    pub level: Option<Level>,
    pub title: String,
    /// Motivational or definition line shown under the title.
    pub motivation: Option<String>,
    /// Bulleted concept overview.
    pub concepts: Vec<String>,
    /// Free-text theory/intuition with inline markup.
    pub theory: Option<String>,
    pub formulas: Vec<Formula>,
    pub examples: Vec<WorkedExample>,
    pub takeaways: Vec<String>,
    pub common_mistakes: Vec<String>,
    pub applications: Vec<String>,
    pub exam_tips: Vec<String>,
    pub industry_insight: Option<String>,
    pub quiz: Option<Quiz>,
    pub ai_summary: Option<StaticSummary>,
}

/// A front/back study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}
