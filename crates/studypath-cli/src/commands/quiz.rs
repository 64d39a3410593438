//! The `studypath quiz` command.

use std::path::PathBuf;

use anyhow::Result;

use studypath_core::error::StudyError;
use studypath_core::progression::ProgressionEvaluator;
use studypath_core::quiz::{QuizPage, QuizPhase};
use studypath_render::terminal::to_text;
use studypath_render::{render_graded_quiz, render_progression, render_quiz};

use super::App;

/// Parse `--answers`: one entry per question, `-` or empty for unanswered.
fn parse_answers(raw: &str) -> Result<Vec<Option<usize>>, StudyError> {
    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(i, a)| match a {
            "" | "-" => Ok(None),
            n => n.parse::<usize>().map(Some).map_err(|_| {
                StudyError::InvalidAnswer(format!("answer {} is not an option number: {n}", i + 1))
            }),
        })
        .collect()
}

pub async fn execute(config_path: Option<PathBuf>, answers: Option<String>) -> Result<()> {
    let app = App::load(config_path.as_deref())?;
    let selected = app.selection()?.require_module()?;

    let record = match app
        .source
        .module(&selected.subject, selected.level, &selected.module_id)
        .await
    {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::debug!("no module record for {selected}: {e:#}");
            None
        }
    };

    let mut page = QuizPage::new();
    page.load_quiz(app.source.as_ref(), &selected, record.as_ref())
        .await?;

    let Some(raw) = answers else {
        if let Some(session) = page.session() {
            print!("{}", to_text(&render_quiz(session)));
            println!(
                "\nSubmit with: studypath quiz --answers <{} comma-separated option numbers>",
                session.quiz().questions.len()
            );
        }
        return Ok(());
    };

    for (question, answer) in parse_answers(&raw)?.into_iter().enumerate() {
        if let Some(option) = answer {
            page.select(question, option)?;
        }
    }

    let grade = match page.submit() {
        Ok(grade) => grade,
        Err(e @ StudyError::Unanswered { .. }) => {
            if let Some(session) = page.session() {
                print!("{}", to_text(&render_quiz(session)));
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if let QuizPhase::Graded(session, grade) = page.phase() {
        print!("{}", to_text(&render_graded_quiz(session, grade)));
    }

    let evaluator = ProgressionEvaluator::new(app.source.clone(), app.store.clone());
    let outcome = evaluator
        .handle_progression(&selected, grade.percentage)
        .await?;
    print!("{}", to_text(&render_progression(outcome, selected.level)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_with_blanks() {
        assert_eq!(
            parse_answers("0, 2,-,1").unwrap(),
            vec![Some(0), Some(2), None, Some(1)]
        );
        assert_eq!(parse_answers("1,,3").unwrap(), vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn non_numeric_answer_is_rejected() {
        assert!(matches!(
            parse_answers("0,b"),
            Err(StudyError::InvalidAnswer(_))
        ));
    }
}
