//! Legacy JSON adapter.
//!
//! Content files were authored over several schema revisions. This module is
//! the one place that knows about them: it decodes every known shape into
//! intermediate structs and converts those into the canonical records in
//! [`crate::model`].
//!
//! Module shapes:
//! - `module_header` plus top-level arrays (`concept_overview`, `formulas`,
//!   `worked_examples`, `key_takeaways`, ...)
//! - `content_cards` (`motivation`, `concept_overview`, `intuition`,
//!   `math_derivation`, `worked_example`, `key_takeaways`) with
//!   `core_content.intuition` as a fallback
//! - `core_content` plus `exam_orientation`
//! - the plain `{title, content: [paragraphs], industry_insight}` shape
//!
//! Quiz shapes:
//! - per-subject file `{module_id: {questions: [...]}}`
//! - embedded `quiz` as an array or as `{questions: [...]}`
//! - difficulty banks `{easy, medium, hard}` naming the answer by text

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::StudyError;
use crate::model::{
    Curriculum, Flashcard, Formula, Level, Module, ModuleRef, ModuleSummary, Question, Quiz,
    WorkedExample,
};
use crate::summary::StaticSummary;

/// Questions taken from a difficulty bank.
pub const BANK_QUESTION_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Intermediate shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawModule {
    #[serde(default, alias = "id")]
    module_id: Option<String>,
    #[serde(default)]
    module_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    subject: Option<String>,

    #[serde(default)]
    module_header: Option<RawHeader>,
    #[serde(default)]
    content_cards: Option<RawCards>,
    #[serde(default)]
    core_content: Option<RawCore>,
    #[serde(default)]
    exam_orientation: Option<RawExam>,

    #[serde(default)]
    motivation: Option<String>,
    #[serde(default, alias = "key_concepts")]
    concept_overview: Vec<String>,
    #[serde(default)]
    learning_objectives: Vec<String>,
    #[serde(default)]
    theory: Option<String>,
    #[serde(default)]
    intuition: Option<String>,
    #[serde(default)]
    content: Vec<String>,
    #[serde(default)]
    formulas: Vec<RawFormula>,
    #[serde(default)]
    worked_examples: Vec<RawExample>,
    #[serde(default)]
    key_takeaways: Vec<String>,
    #[serde(default)]
    common_mistakes: Vec<String>,
    #[serde(default)]
    real_world_applications: Vec<String>,
    #[serde(default)]
    exam_tips: Vec<String>,
    #[serde(default)]
    industry_insight: Option<String>,

    #[serde(default)]
    quiz: Option<RawEmbeddedQuiz>,
    #[serde(default)]
    ai_summary: Option<StaticSummary>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(default, alias = "id")]
    module_id: Option<String>,
    #[serde(default)]
    module_name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default, alias = "definition")]
    motivation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCards {
    #[serde(default)]
    motivation: Option<RawTextCard>,
    #[serde(default)]
    concept_overview: Option<RawPointsCard>,
    #[serde(default)]
    intuition: Option<RawTextCard>,
    #[serde(default)]
    math_derivation: Option<RawTextCard>,
    #[serde(default)]
    worked_example: Option<RawExample>,
    #[serde(default)]
    key_takeaways: Option<RawPointsCard>,
}

#[derive(Debug, Deserialize)]
struct RawTextCard {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPointsCard {
    #[serde(default)]
    points: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCore {
    #[serde(default)]
    theory: Option<String>,
    #[serde(default)]
    intuition: Option<String>,
    #[serde(default)]
    worked_examples: Vec<RawExample>,
    #[serde(default)]
    common_mistakes: Vec<String>,
    #[serde(default)]
    real_world_applications: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawExam {
    #[serde(default)]
    tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFormula {
    Text(String),
    Full {
        #[serde(alias = "formula", alias = "latex")]
        expression: String,
        #[serde(default)]
        explanation: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawExample {
    #[serde(default)]
    problem: String,
    #[serde(default)]
    solution: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default, alias = "answer")]
    final_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "q")]
    question: String,
    #[serde(alias = "opts")]
    options: Vec<String>,
    #[serde(default)]
    correct: Option<usize>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, alias = "exp")]
    explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEmbeddedQuiz {
    List(Vec<RawQuestion>),
    Wrapped { questions: Vec<RawQuestion> },
}

impl RawEmbeddedQuiz {
    fn into_questions(self) -> Vec<RawQuestion> {
        match self {
            RawEmbeddedQuiz::List(qs) | RawEmbeddedQuiz::Wrapped { questions: qs } => qs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCurriculum {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    levels: BTreeMap<String, RawLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Wrapped { modules: Vec<RawModule> },
    List(Vec<RawModule>),
}

impl RawLevel {
    fn into_modules(self) -> Vec<RawModule> {
        match self {
            RawLevel::Wrapped { modules } | RawLevel::List(modules) => modules,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawModuleNames {
    #[serde(default)]
    modules: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTopics {
    #[serde(default)]
    topics: Vec<String>,
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

fn decode<'a, T: Deserialize<'a>>(content: &'a str, what: &str) -> Result<T, StudyError> {
    serde_json::from_str(content)
        .map_err(|e| StudyError::InvalidContent(format!("malformed {what}: {e}")))
}

/// Decode a single module record in any known shape.
///
/// `hint` supplies the subject, level, and id when the record omits them.
pub fn parse_module_str(content: &str, hint: &ModuleRef) -> Result<Module, StudyError> {
    let raw: RawModule = decode(content, "module")?;
    convert_module(raw, hint)
}

/// Decode a curriculum file (`{subject, levels: {level: {modules: [...]}}}`).
///
/// Level keys that are not a known level are skipped with a warning.
pub fn parse_curriculum_str(content: &str, subject: &str) -> Result<Curriculum, StudyError> {
    let raw: RawCurriculum = decode(content, "curriculum")?;
    let subject = non_blank(raw.subject).unwrap_or_else(|| subject.to_string());

    let mut levels = BTreeMap::new();
    for (key, level) in raw.levels {
        let Ok(parsed) = key.parse::<Level>() else {
            tracing::warn!("skipping unknown level {key:?} in {subject} curriculum");
            continue;
        };
        let modules = level
            .into_modules()
            .into_iter()
            .filter_map(|m| summarize(&m))
            .collect();
        levels.insert(parsed, modules);
    }

    Ok(Curriculum { subject, levels })
}

/// Find a full module record inside a curriculum file whose level entries
/// carry complete module records.
pub fn find_module_in_curriculum_str(
    content: &str,
    hint: &ModuleRef,
) -> Result<Option<Module>, StudyError> {
    let raw: RawCurriculum = decode(content, "curriculum")?;
    for (key, level) in raw.levels {
        if key.parse::<Level>().ok() != Some(hint.level) {
            continue;
        }
        for m in level.into_modules() {
            if module_id_of(&m).as_deref() == Some(hint.module_id.as_str()) {
                return convert_module(m, hint).map(Some);
            }
        }
    }
    Ok(None)
}

/// Decode a network module listing (`{modules: [name, ...]}`). Names double
/// as module ids.
pub fn parse_module_names(content: &str) -> Result<Vec<ModuleSummary>, StudyError> {
    let raw: RawModuleNames = decode(content, "module list")?;
    Ok(raw
        .modules
        .into_iter()
        .map(|name| ModuleSummary {
            module_id: name.clone(),
            module_name: name,
        })
        .collect())
}

/// Decode a per-subject quiz file keyed by module id.
///
/// Entries that cannot be converted are skipped with a warning so one broken
/// quiz does not hide the rest.
pub fn parse_quiz_file_str(content: &str) -> Result<BTreeMap<String, Quiz>, StudyError> {
    let mut quizzes = BTreeMap::new();
    for (module_id, converted) in decode_quiz_file(content)? {
        match converted {
            Ok(quiz) => {
                quizzes.insert(module_id, quiz);
            }
            Err(e) => tracing::warn!("skipping quiz {module_id}: {e}"),
        }
    }
    Ok(quizzes)
}

/// Every entry of a per-subject quiz file with its conversion result, in
/// module id order.
pub(crate) fn decode_quiz_file(
    content: &str,
) -> Result<Vec<(String, Result<Quiz, StudyError>)>, StudyError> {
    let raw: BTreeMap<String, serde_json::Value> = decode(content, "quiz file")?;
    Ok(raw
        .into_iter()
        .map(|(module_id, value)| {
            let converted = serde_json::from_value::<RawEmbeddedQuiz>(value)
                .map_err(|e| StudyError::InvalidContent(format!("malformed quiz: {e}")))
                .and_then(|q| convert_quiz(&module_id, q.into_questions()));
            (module_id, converted)
        })
        .collect())
}

/// Decode a difficulty bank (`{easy, medium, hard}`) and build the quiz for a
/// level: the level's bank, first [`BANK_QUESTION_LIMIT`] questions.
pub fn parse_quiz_bank_str(
    content: &str,
    level: Level,
    module_id: &str,
) -> Result<Quiz, StudyError> {
    let mut banks: HashMap<String, Vec<RawQuestion>> = decode(content, "question bank")?;
    let bank = banks.remove(level.difficulty()).ok_or_else(|| {
        StudyError::NotFound(format!("{} questions for {level}", level.difficulty()))
    })?;
    let questions = bank.into_iter().take(BANK_QUESTION_LIMIT).collect();
    let mut quiz = convert_quiz(module_id, questions)?;
    quiz.adaptive = true;
    Ok(quiz)
}

/// Decode a flashcard list (`[{front, back}]`).
pub fn parse_flashcards_str(content: &str) -> Result<Vec<Flashcard>, StudyError> {
    decode(content, "flashcards")
}

/// Decode a topic listing (`{topics: [...]}`).
pub fn parse_topics_str(content: &str) -> Result<Vec<String>, StudyError> {
    let raw: RawTopics = decode(content, "topic list")?;
    Ok(raw.topics)
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn first_non_empty(lists: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    lists.into_iter().find(|l| !l.is_empty()).unwrap_or_default()
}

fn module_id_of(m: &RawModule) -> Option<String> {
    non_blank(m.module_header.as_ref().and_then(|h| h.module_id.clone()))
        .or_else(|| non_blank(m.module_id.clone()))
}

fn display_name_of(m: &RawModule) -> Option<String> {
    let header = m.module_header.as_ref();
    non_blank(header.and_then(|h| h.module_name.clone()))
        .or_else(|| non_blank(header.and_then(|h| h.title.clone())))
        .or_else(|| non_blank(m.module_name.clone()))
        .or_else(|| non_blank(m.title.clone()))
}

fn summarize(m: &RawModule) -> Option<ModuleSummary> {
    let Some(module_id) = module_id_of(m) else {
        tracing::warn!("skipping curriculum entry without a module_id");
        return None;
    };
    let module_name = display_name_of(m).unwrap_or_else(|| module_id.clone());
    Some(ModuleSummary {
        module_id,
        module_name,
    })
}

fn convert_example(e: RawExample) -> WorkedExample {
    WorkedExample {
        problem: e.problem,
        solution: e.solution,
        difficulty: non_blank(e.difficulty),
        final_answer: non_blank(e.final_answer),
    }
}

fn convert_formula(f: RawFormula) -> Formula {
    match f {
        RawFormula::Text(expression) => Formula {
            expression,
            explanation: String::new(),
        },
        RawFormula::Full {
            expression,
            explanation,
        } => Formula {
            expression,
            explanation,
        },
    }
}

fn convert_question(module_id: &str, index: usize, q: RawQuestion) -> Result<Question, StudyError> {
    let correct = match (q.correct, q.answer.as_deref()) {
        (Some(c), _) => c,
        (None, Some(answer)) => q
            .options
            .iter()
            .position(|o| o.trim() == answer.trim())
            .ok_or_else(|| {
                StudyError::InvalidContent(format!(
                    "{module_id} question {}: answer {answer:?} is not one of the options",
                    index + 1
                ))
            })?,
        (None, None) => {
            return Err(StudyError::InvalidContent(format!(
                "{module_id} question {}: no correct answer",
                index + 1
            )))
        }
    };
    if correct >= q.options.len() {
        return Err(StudyError::InvalidContent(format!(
            "{module_id} question {}: correct index {correct} out of range for {} options",
            index + 1,
            q.options.len()
        )));
    }
    Ok(Question {
        question: q.question,
        options: q.options,
        correct,
        explanation: q.explanation,
    })
}

fn convert_quiz(module_id: &str, questions: Vec<RawQuestion>) -> Result<Quiz, StudyError> {
    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| convert_question(module_id, i, q))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Quiz {
        module_id: module_id.to_string(),
        questions,
        adaptive: false,
    })
}

fn convert_module(raw: RawModule, hint: &ModuleRef) -> Result<Module, StudyError> {
    let module_id = module_id_of(&raw).unwrap_or_else(|| hint.module_id.clone());
    let title = display_name_of(&raw).unwrap_or_else(|| module_id.clone());
    let RawModule {
        level,
        subject,
        module_header,
        content_cards,
        core_content,
        exam_orientation,
        motivation,
        concept_overview,
        learning_objectives,
        theory,
        intuition,
        content,
        formulas,
        worked_examples,
        key_takeaways,
        common_mistakes,
        real_world_applications,
        exam_tips,
        industry_insight,
        quiz,
        ai_summary,
        ..
    } = raw;

    let header = module_header.unwrap_or_default();
    let cards = content_cards.unwrap_or_default();
    let core = core_content.unwrap_or_default();
    let exam = exam_orientation.unwrap_or_default();

    let level = non_blank(header.level)
        .or(level)
        .and_then(|l| l.parse::<Level>().ok())
        .unwrap_or(hint.level);
    let subject = non_blank(header.subject)
        .or_else(|| non_blank(subject))
        .unwrap_or_else(|| hint.subject.clone());

    let motivation = non_blank(cards.motivation.and_then(|c| c.content))
        .or_else(|| non_blank(motivation))
        .or_else(|| non_blank(header.motivation));

    let concepts = first_non_empty([
        cards.concept_overview.map(|c| c.points).unwrap_or_default(),
        concept_overview,
        learning_objectives,
    ]);

    let paragraphs = (!content.is_empty()).then(|| content.join("\n\n"));
    let theory = non_blank(cards.intuition.and_then(|c| c.content))
        .or_else(|| non_blank(theory))
        .or_else(|| non_blank(core.theory))
        .or_else(|| non_blank(intuition))
        .or_else(|| non_blank(core.intuition))
        .or_else(|| non_blank(paragraphs));

    let mut formulas: Vec<Formula> = formulas.into_iter().map(convert_formula).collect();
    if let Some(derivation) = non_blank(cards.math_derivation.and_then(|c| c.content)) {
        formulas.push(Formula {
            expression: derivation,
            explanation: String::new(),
        });
    }

    let examples = match cards.worked_example {
        Some(e) => vec![convert_example(e)],
        None if !worked_examples.is_empty() => {
            worked_examples.into_iter().map(convert_example).collect()
        }
        None => core.worked_examples.into_iter().map(convert_example).collect(),
    };

    let takeaways = first_non_empty([
        cards.key_takeaways.map(|c| c.points).unwrap_or_default(),
        key_takeaways,
    ]);

    let quiz = quiz
        .map(|q| convert_quiz(&module_id, q.into_questions()))
        .transpose()?
        .filter(|q| !q.questions.is_empty());

    Ok(Module {
        module_id,
        subject,
        level: Some(level),
        title,
        motivation,
        concepts,
        theory,
        formulas,
        examples,
        takeaways,
        common_mistakes: first_non_empty([common_mistakes, core.common_mistakes]),
        applications: first_non_empty([real_world_applications, core.real_world_applications]),
        exam_tips: first_non_empty([exam_tips, exam.tips]),
        industry_insight: non_blank(industry_insight),
        quiz,
        ai_summary: ai_summary.filter(|s| !s.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint() -> ModuleRef {
        ModuleRef::new("mathematics", Level::Beginner, "sets_relations")
    }

    #[test]
    fn content_cards_shape() {
        let json = r#"{
            "module_id": "sets_relations",
            "module_name": "Sets and Relations",
            "level": "beginner",
            "content_cards": {
                "motivation": {"title": "Why", "content": "Sets are everywhere."},
                "concept_overview": {"points": ["Union", "Intersection"]},
                "intuition": {"content": "A set is a collection."},
                "math_derivation": {"content": "$A \\cup B$"},
                "worked_example": {"problem": "Find A∪B", "solution": "**Step 1**"},
                "key_takeaways": {"points": ["Order does not matter."]}
            },
            "core_content": {"theory": "legacy", "intuition": "See Rich Content Card."}
        }"#;
        let m = parse_module_str(json, &hint()).unwrap();
        assert_eq!(m.title, "Sets and Relations");
        assert_eq!(m.motivation.as_deref(), Some("Sets are everywhere."));
        assert_eq!(m.concepts, ["Union", "Intersection"]);
        assert_eq!(m.theory.as_deref(), Some("A set is a collection."));
        assert_eq!(m.formulas.len(), 1);
        assert_eq!(m.examples[0].problem, "Find A∪B");
        assert_eq!(m.takeaways, ["Order does not matter."]);
        assert_eq!(m.subject, "mathematics");
    }

    #[test]
    fn cards_without_intuition_fall_back_to_core() {
        let json = r#"{
            "module_id": "x",
            "content_cards": {},
            "core_content": {"intuition": "Think of it as a bag."}
        }"#;
        let m = parse_module_str(json, &hint()).unwrap();
        assert_eq!(m.theory.as_deref(), Some("Think of it as a bag."));
        assert!(m.motivation.is_none());
        assert!(m.examples.is_empty());
    }

    #[test]
    fn core_and_exam_orientation_shape() {
        let json = r#"{
            "module_id": "python_basics",
            "module_name": "Python for AI/ML",
            "level": "beginner",
            "learning_objectives": ["Understand syntax"],
            "core_content": {
                "theory": "Python is the language of choice.",
                "intuition": "Readable code.",
                "worked_examples": [
                    {"problem": "p1", "solution": "s1"},
                    {"problem": "p2", "solution": "s2"}
                ],
                "common_mistakes": ["Indentation"],
                "real_world_applications": ["Data science"]
            },
            "exam_orientation": {"frequently_asked": ["Q"], "tips": ["Practice"]}
        }"#;
        let m = parse_module_str(json, &ModuleRef::new("aiml", Level::Beginner, "python_basics"))
            .unwrap();
        assert_eq!(m.theory.as_deref(), Some("Python is the language of choice."));
        assert_eq!(m.concepts, ["Understand syntax"]);
        assert_eq!(m.examples.len(), 2);
        assert_eq!(m.common_mistakes, ["Indentation"]);
        assert_eq!(m.applications, ["Data science"]);
        assert_eq!(m.exam_tips, ["Practice"]);
    }

    #[test]
    fn module_header_shape_with_embedded_quiz() {
        let json = r#"{
            "module_header": {
                "module_id": "limits",
                "module_name": "Limits",
                "level": "intermediate",
                "definition": "The value a function approaches."
            },
            "concept_overview": ["Left limit", "Right limit"],
            "theory": "Limits describe behaviour near a point.",
            "formulas": [
                {"formula": "\\lim_{x\\to a} f(x)", "explanation": "limit of f"},
                "e = \\lim (1 + 1/n)^n"
            ],
            "worked_examples": [
                {"problem": "lim x", "solution": "a", "difficulty": "easy", "final_answer": "a"}
            ],
            "key_takeaways": ["Check both sides."],
            "quiz": {"questions": [
                {"question": "lim 1/x at 0+?", "options": ["0", "inf"], "correct": 1, "explanation": "Grows."}
            ]},
            "ai_summary": {"key_ideas": ["Approach"], "exam_tip": "Draw it."}
        }"#;
        let m = parse_module_str(json, &hint()).unwrap();
        assert_eq!(m.module_id, "limits");
        assert_eq!(m.level, Some(Level::Intermediate));
        assert_eq!(m.motivation.as_deref(), Some("The value a function approaches."));
        assert_eq!(m.formulas.len(), 2);
        assert_eq!(m.formulas[0].explanation, "limit of f");
        assert_eq!(m.formulas[1].explanation, "");
        assert_eq!(m.examples[0].final_answer.as_deref(), Some("a"));
        let quiz = m.quiz.unwrap();
        assert_eq!(quiz.module_id, "limits");
        assert_eq!(quiz.questions[0].correct, 1);
        assert_eq!(m.ai_summary.unwrap().key_ideas, ["Approach"]);
    }

    #[test]
    fn plain_network_shape() {
        let json = r#"{
            "title": "Bias in Data",
            "content": ["First paragraph.", "Second paragraph."],
            "industry_insight": "Audits are routine."
        }"#;
        let m = parse_module_str(json, &ModuleRef::new("ethics", Level::Beginner, "bias_in_data"))
            .unwrap();
        assert_eq!(m.module_id, "bias_in_data");
        assert_eq!(m.title, "Bias in Data");
        assert_eq!(
            m.theory.as_deref(),
            Some("First paragraph.\n\nSecond paragraph.")
        );
        assert_eq!(m.industry_insight.as_deref(), Some("Audits are routine."));
    }

    #[test]
    fn embedded_quiz_as_array_and_bad_index() {
        let ok = r#"{"module_id": "x", "quiz": [
            {"question": "?", "options": ["a", "b"], "correct": 0}
        ]}"#;
        assert_eq!(parse_module_str(ok, &hint()).unwrap().quiz.unwrap().questions.len(), 1);

        let bad = r#"{"module_id": "x", "quiz": [
            {"question": "?", "options": ["a", "b"], "correct": 2}
        ]}"#;
        assert!(matches!(
            parse_module_str(bad, &hint()),
            Err(StudyError::InvalidContent(_))
        ));
    }

    #[test]
    fn curriculum_keeps_source_order() {
        let json = r#"{
            "subject": "mathematics",
            "levels": {
                "beginner": {"modules": [
                    {"module_id": "number_systems", "module_name": "Number Systems"},
                    {"module_id": "algebra", "module_name": "Algebra"}
                ]},
                "advanced": {"modules": []},
                "expert": {"modules": [{"module_id": "x"}]}
            }
        }"#;
        let c = parse_curriculum_str(json, "ignored").unwrap();
        assert_eq!(c.subject, "mathematics");
        let ids: Vec<_> = c
            .modules(Level::Beginner)
            .iter()
            .map(|m| m.module_id.as_str())
            .collect();
        assert_eq!(ids, ["number_systems", "algebra"]);
        assert!(c.modules(Level::Advanced).is_empty());
        assert!(c.modules(Level::Intermediate).is_empty());
        assert_eq!(c.levels.len(), 2);
    }

    #[test]
    fn find_module_inside_curriculum() {
        let json = r#"{"levels": {"beginner": {"modules": [
            {"module_id": "a", "module_name": "A"},
            {"module_id": "sets_relations", "module_name": "Sets",
             "core_content": {"theory": "Collections."}}
        ]}}}"#;
        let m = find_module_in_curriculum_str(json, &hint()).unwrap().unwrap();
        assert_eq!(m.title, "Sets");
        assert_eq!(m.theory.as_deref(), Some("Collections."));

        let other = ModuleRef::new("mathematics", Level::Advanced, "sets_relations");
        assert!(find_module_in_curriculum_str(json, &other).unwrap().is_none());
    }

    #[test]
    fn network_module_names() {
        let names = parse_module_names(r#"{"modules": ["fairness", "privacy"]}"#).unwrap();
        assert_eq!(names[1].module_id, "privacy");
        assert_eq!(names[1].module_name, "privacy");
    }

    #[test]
    fn quiz_file_skips_broken_entries() {
        let json = r#"{
            "sets": {"questions": [{"question": "?", "options": ["a", "b"], "correct": 1, "explanation": "b"}]},
            "broken": {"questions": [{"question": "?", "options": ["a"], "correct": 5}]}
        }"#;
        let quizzes = parse_quiz_file_str(json).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes["sets"].questions[0].explanation, "b");
        assert!(!quizzes["sets"].adaptive);
    }

    #[test]
    fn difficulty_bank_maps_level_and_answer_text() {
        let q = |n: usize| {
            format!(r#"{{"question": "q{n}", "options": ["yes", "no"], "answer": "no"}}"#)
        };
        let medium: Vec<String> = (0..7).map(q).collect();
        let json = format!(
            r#"{{"easy": [], "medium": [{}], "hard": []}}"#,
            medium.join(",")
        );
        let quiz = parse_quiz_bank_str(&json, Level::Intermediate, "fairness").unwrap();
        assert_eq!(quiz.questions.len(), BANK_QUESTION_LIMIT);
        assert!(quiz.questions.iter().all(|q| q.correct == 1));
        assert!(quiz.adaptive);

        let missing = parse_quiz_bank_str(r#"{"easy": []}"#, Level::Advanced, "x");
        assert!(matches!(missing, Err(StudyError::NotFound(_))));
    }

    #[test]
    fn bank_answer_must_be_an_option() {
        let json = r#"{"easy": [{"question": "?", "options": ["a"], "answer": "z"}]}"#;
        assert!(matches!(
            parse_quiz_bank_str(json, Level::Beginner, "x"),
            Err(StudyError::InvalidContent(_))
        ));
    }

    #[test]
    fn flashcards_and_topics() {
        let cards = parse_flashcards_str(r#"[{"front": "Bias", "back": "Skew"}]"#).unwrap();
        assert_eq!(cards[0].back, "Skew");
        let topics = parse_topics_str(r#"{"topics": ["ethics", "privacy"]}"#).unwrap();
        assert_eq!(topics, ["ethics", "privacy"]);
    }

    #[test]
    fn malformed_json_is_invalid_content() {
        assert!(matches!(
            parse_curriculum_str("{not json", "x"),
            Err(StudyError::InvalidContent(_))
        ));
    }
}
