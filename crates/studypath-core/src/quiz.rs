//! Quiz engine: loading, answering, all-or-nothing grading, and reset.
//!
//! A [`QuizPage`] owns the lifecycle of one page's quiz. It starts empty,
//! holds a [`QuizSession`] while the user answers, keeps the [`Grade`] once
//! submitted, and drops everything on [`QuizPage::reset`]. Nothing here
//! touches persisted progress; that is the progression evaluator's job.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StudyError;
use crate::model::{Module, ModuleRef, Quiz};
use crate::traits::ContentSource;

/// `round(100 * score / total)` with halves rounded up. Zero when `total` is 0.
pub fn percentage(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = score.min(total);
    ((200 * score + total) / (2 * total)) as u8
}

/// How one question was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub chosen: usize,
    pub correct: usize,
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub score: usize,
    pub total: usize,
    pub percentage: u8,
    pub outcomes: Vec<QuestionOutcome>,
}

/// One attempt at a quiz: the questions and the option chosen for each.
#[derive(Debug, Clone)]
pub struct QuizSession {
    attempt_id: Uuid,
    module: ModuleRef,
    quiz: Quiz,
    answers: Vec<Option<usize>>,
    locked: bool,
}

impl QuizSession {
    /// Start an attempt. A quiz without questions counts as no quiz at all.
    pub fn new(module: ModuleRef, quiz: Quiz) -> Result<Self, StudyError> {
        if quiz.questions.is_empty() {
            return Err(StudyError::NotFound(format!("a quiz for module {module}")));
        }
        let answers = vec![None; quiz.questions.len()];
        Ok(Self {
            attempt_id: Uuid::new_v4(),
            module,
            quiz,
            answers,
            locked: false,
        })
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn module(&self) -> &ModuleRef {
        &self.module
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// Whether grading has disabled further input.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Choose an option for a question, replacing any earlier choice.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), StudyError> {
        if self.locked {
            return Err(StudyError::InvalidAnswer("quiz already submitted".into()));
        }
        let q = self.quiz.questions.get(question).ok_or_else(|| {
            StudyError::InvalidAnswer(format!("question {} does not exist", question + 1))
        })?;
        if option >= q.options.len() {
            return Err(StudyError::InvalidAnswer(format!(
                "question {} has no option {}",
                question + 1,
                option
            )));
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Clear the choice for a question.
    pub fn clear(&mut self, question: usize) {
        if !self.locked {
            if let Some(slot) = self.answers.get_mut(question) {
                *slot = None;
            }
        }
    }

    /// Number of questions without a chosen option.
    pub fn unanswered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_none()).count()
    }

    /// Grade the attempt. If any question is unanswered nothing is graded and
    /// the session stays open for more answers.
    pub fn submit(&mut self) -> Result<Grade, StudyError> {
        if self.locked {
            return Err(StudyError::InvalidAnswer("quiz already submitted".into()));
        }
        let remaining = self.unanswered();
        if remaining > 0 {
            return Err(StudyError::Unanswered { remaining });
        }

        let outcomes: Vec<QuestionOutcome> = self
            .quiz
            .questions
            .iter()
            .zip(&self.answers)
            .filter_map(|(q, a)| {
                a.map(|chosen| QuestionOutcome {
                    chosen,
                    correct: q.correct,
                })
            })
            .collect();
        let score = outcomes.iter().filter(|o| o.is_correct()).count();
        let total = self.quiz.questions.len();
        self.locked = true;

        let grade = Grade {
            score,
            total,
            percentage: percentage(score, total),
            outcomes,
        };
        tracing::info!(
            attempt = %self.attempt_id,
            module = %self.module,
            "graded {}/{} ({}%)",
            grade.score,
            grade.total,
            grade.percentage
        );
        Ok(grade)
    }
}

/// Where a quiz page is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum QuizPhase {
    #[default]
    NotStarted,
    Answering(QuizSession),
    Graded(QuizSession, Grade),
}

/// Page controller owning at most one quiz attempt.
#[derive(Debug, Default)]
pub struct QuizPage {
    phase: QuizPhase,
}

impl QuizPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    /// The active session, graded or not.
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            QuizPhase::NotStarted => None,
            QuizPhase::Answering(s) | QuizPhase::Graded(s, _) => Some(s),
        }
    }

    /// Load the quiz for a module and begin answering.
    ///
    /// The quiz embedded in the module record is used when present; otherwise
    /// the source's quiz lookup is consulted.
    pub async fn load_quiz(
        &mut self,
        source: &dyn ContentSource,
        module: &ModuleRef,
        record: Option<&Module>,
    ) -> anyhow::Result<()> {
        let quiz = match record.and_then(|m| m.quiz.clone()) {
            Some(quiz) => quiz,
            None => source
                .quiz(&module.subject, module.level, &module.module_id)
                .await
                .with_context(|| format!("could not load quiz for {module}"))?,
        };
        let session = QuizSession::new(module.clone(), quiz)?;
        tracing::debug!(attempt = %session.attempt_id(), "quiz loaded for {module}");
        self.phase = QuizPhase::Answering(session);
        Ok(())
    }

    /// Record an answer on the active session.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), StudyError> {
        match &mut self.phase {
            QuizPhase::Answering(session) => session.select(question, option),
            QuizPhase::Graded(..) => Err(StudyError::InvalidAnswer("quiz already submitted".into())),
            QuizPhase::NotStarted => Err(StudyError::InvalidAnswer("no quiz loaded".into())),
        }
    }

    /// Submit the active session. On success the page moves to `Graded`.
    pub fn submit(&mut self) -> Result<Grade, StudyError> {
        let session = match &mut self.phase {
            QuizPhase::Answering(session) => session,
            QuizPhase::Graded(..) => {
                return Err(StudyError::InvalidAnswer("quiz already submitted".into()))
            }
            QuizPhase::NotStarted => return Err(StudyError::InvalidAnswer("no quiz loaded".into())),
        };
        let grade = session.submit()?;
        if let QuizPhase::Answering(session) = std::mem::take(&mut self.phase) {
            self.phase = QuizPhase::Graded(session, grade.clone());
        }
        Ok(grade)
    }

    /// Discard the attempt and return to the pre-quiz state.
    pub fn reset(&mut self) {
        self.phase = QuizPhase::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, Question};

    fn question(correct: usize) -> Question {
        Question {
            question: "Pick one".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            explanation: "Because.".into(),
        }
    }

    fn session(corrects: &[usize]) -> QuizSession {
        let quiz = Quiz {
            module_id: "sets".into(),
            questions: corrects.iter().map(|&c| question(c)).collect(),
            adaptive: false,
        };
        QuizSession::new(ModuleRef::new("mathematics", Level::Beginner, "sets"), quiz).unwrap()
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn empty_quiz_is_missing_data() {
        let quiz = Quiz {
            module_id: "x".into(),
            questions: vec![],
            adaptive: false,
        };
        let err = QuizSession::new(ModuleRef::new("m", Level::Beginner, "x"), quiz).unwrap_err();
        assert!(matches!(err, StudyError::NotFound(_)));
    }

    #[test]
    fn submit_with_unanswered_grades_nothing() {
        let mut s = session(&[0, 1, 2]);
        s.select(0, 0).unwrap();
        let err = s.submit().unwrap_err();
        assert!(matches!(err, StudyError::Unanswered { remaining: 2 }));
        assert!(!s.is_locked());

        s.select(1, 1).unwrap();
        s.select(2, 2).unwrap();
        let grade = s.submit().unwrap();
        assert_eq!(grade.score, 3);
        assert_eq!(grade.percentage, 100);
    }

    #[test]
    fn grading_marks_chosen_and_correct() {
        let mut s = session(&[0, 1, 2, 3, 0]);
        for (q, opt) in [0, 1, 2, 0, 1].into_iter().enumerate() {
            s.select(q, opt).unwrap();
        }
        let grade = s.submit().unwrap();
        assert_eq!(grade.score, 3);
        assert_eq!(grade.total, 5);
        assert_eq!(grade.percentage, 60);
        assert_eq!(
            grade.outcomes[3],
            QuestionOutcome {
                chosen: 0,
                correct: 3
            }
        );
        assert!(!grade.outcomes[3].is_correct());
    }

    #[test]
    fn graded_session_rejects_input() {
        let mut s = session(&[0]);
        s.select(0, 0).unwrap();
        s.submit().unwrap();
        assert!(s.is_locked());
        assert!(s.select(0, 1).is_err());
        assert!(s.submit().is_err());
    }

    #[test]
    fn select_validates_indices() {
        let mut s = session(&[0]);
        assert!(matches!(s.select(1, 0), Err(StudyError::InvalidAnswer(_))));
        assert!(matches!(s.select(0, 4), Err(StudyError::InvalidAnswer(_))));
        s.select(0, 3).unwrap();
        s.clear(0);
        assert_eq!(s.unanswered(), 1);
    }

    #[test]
    fn page_lifecycle_and_reset() {
        let mut page = QuizPage::new();
        assert!(page.submit().is_err());
        page.phase = QuizPhase::Answering(session(&[1, 1]));
        page.select(0, 1).unwrap();
        assert!(matches!(
            page.submit(),
            Err(StudyError::Unanswered { remaining: 1 })
        ));
        assert!(matches!(page.phase(), QuizPhase::Answering(_)));

        page.select(1, 0).unwrap();
        let grade = page.submit().unwrap();
        assert_eq!(grade.percentage, 50);
        assert!(matches!(page.phase(), QuizPhase::Graded(_, _)));
        assert!(page.select(0, 0).is_err());

        page.reset();
        assert!(matches!(page.phase(), QuizPhase::NotStarted));
        assert!(page.session().is_none());
    }
}
