//! Content validation.
//!
//! Checks curricula and quizzes for problems that would break the roadmap or
//! the quiz engine at runtime, and walks a static content directory.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Curriculum, Level, Quiz};
use crate::schema;

/// A warning from content validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The file the warning refers to, relative to the content root.
    pub file: Option<String>,
    /// The module ID (if applicable).
    pub module_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn module(module_id: &str, message: impl Into<String>) -> Self {
        Self {
            file: None,
            module_id: Some(module_id.to_string()),
            message: message.into(),
        }
    }

    fn in_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

/// Validate a curriculum for duplicate module ids and empty levels.
pub fn validate_curriculum(curriculum: &Curriculum) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate ids within a level make roadmap selection ambiguous.
    for level in Level::ALL {
        let mut seen = HashSet::new();
        for m in curriculum.modules(level) {
            if !seen.insert(m.module_id.as_str()) {
                warnings.push(ValidationWarning::module(
                    &m.module_id,
                    format!("duplicate module ID in {level}: {}", m.module_id),
                ));
            }
        }
    }

    for level in Level::ALL {
        if curriculum.modules(level).is_empty() {
            warnings.push(ValidationWarning {
                file: None,
                module_id: None,
                message: format!("{level} level has no modules"),
            });
        }
    }

    warnings
}

/// Validate a quiz for missing questions and degenerate options.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning::module(&quiz.module_id, "quiz has no questions"));
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.options.len() < 2 {
            warnings.push(ValidationWarning::module(
                &quiz.module_id,
                format!("question {} has fewer than 2 options", i + 1),
            ));
        }
        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning::module(
                &quiz.module_id,
                format!("question {} has no text", i + 1),
            ));
        }
    }

    warnings
}

/// Validate a static content directory.
///
/// Every `{subject}_curriculum.json` at the root is checked, together with
/// its `quizzes/{subject}_quizzes.json` when present. Files that fail to
/// parse are reported as warnings rather than aborting the walk.
pub fn validate_content_dir(dir: &Path) -> Result<Vec<ValidationWarning>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut curricula = BTreeMap::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(subject) = name.strip_suffix("_curriculum.json") {
            curricula.insert(subject.to_string(), name.to_string());
        }
    }

    let mut warnings = Vec::new();
    if curricula.is_empty() {
        warnings.push(ValidationWarning {
            file: None,
            module_id: None,
            message: "no *_curriculum.json files found".into(),
        });
    }

    for (subject, file) in curricula {
        let content = std::fs::read_to_string(dir.join(&file))
            .with_context(|| format!("failed to read {file}"))?;
        let curriculum = match schema::parse_curriculum_str(&content, &subject) {
            Ok(c) => c,
            Err(e) => {
                warnings.push(ValidationWarning {
                    file: Some(file),
                    module_id: None,
                    message: e.to_string(),
                });
                continue;
            }
        };
        warnings.extend(
            validate_curriculum(&curriculum)
                .into_iter()
                .map(|w| w.in_file(&file)),
        );

        let quiz_file = format!("quizzes/{subject}_quizzes.json");
        let quiz_path = dir.join(&quiz_file);
        if !quiz_path.is_file() {
            tracing::debug!("no quiz file for {subject}");
            continue;
        }
        let content = std::fs::read_to_string(&quiz_path)
            .with_context(|| format!("failed to read {quiz_file}"))?;
        let entries = match schema::decode_quiz_file(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warnings.push(ValidationWarning {
                    file: Some(quiz_file),
                    module_id: None,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let known: HashSet<&str> = Level::ALL
            .iter()
            .flat_map(|&l| curriculum.modules(l))
            .map(|m| m.module_id.as_str())
            .collect();
        for (module_id, converted) in entries {
            if !known.contains(module_id.as_str()) {
                warnings.push(
                    ValidationWarning::module(&module_id, "quiz for a module not in the curriculum")
                        .in_file(&quiz_file),
                );
            }
            match converted {
                Ok(quiz) => warnings.extend(
                    validate_quiz(&quiz)
                        .into_iter()
                        .map(|w| w.in_file(&quiz_file)),
                ),
                Err(e) => warnings
                    .push(ValidationWarning::module(&module_id, e.to_string()).in_file(&quiz_file)),
            }
        }
    }

    Ok(warnings)
}
