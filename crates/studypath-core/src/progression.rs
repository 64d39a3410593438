//! Progression evaluator.
//!
//! After a graded quiz, stores the best score for the module and decides
//! whether the user should review, move on, or has completed the level.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Curriculum, Level, ModuleRef};
use crate::progress::ProgressRecord;
use crate::traits::{ContentSource, KeyValueStore};

/// Minimum percentage for a module to count as passed.
pub const PASS_THRESHOLD: u8 = 60;

/// What the user sees after a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionOutcome {
    /// Score below the threshold.
    NeedsReview,
    /// Module passed; other modules in the level are not yet passed, or the
    /// level could not be checked.
    ModulePassed,
    /// Every module in the level has a best score at or above the threshold.
    LevelComplete,
}

/// Whether every module of `level` in the curriculum has a stored best score
/// of at least [`PASS_THRESHOLD`]. A level listed without modules is complete;
/// a level the curriculum does not list at all is not.
pub fn check_level_completion(
    curriculum: &Curriculum,
    level: Level,
    progress: &ProgressRecord,
) -> bool {
    let Some(modules) = curriculum.levels.get(&level) else {
        return false;
    };
    modules.iter().all(|m| {
        progress
            .best_score(&curriculum.subject, level, &m.module_id)
            .unwrap_or(0)
            >= PASS_THRESHOLD
    })
}

/// Persists scores and evaluates level completion.
pub struct ProgressionEvaluator {
    source: Arc<dyn ContentSource>,
    store: Arc<dyn KeyValueStore>,
}

impl ProgressionEvaluator {
    pub fn new(source: Arc<dyn ContentSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { source, store }
    }

    /// Record `score` for `module` and evaluate progression.
    ///
    /// The progress record is read, updated with the maximum of the old and
    /// new score, and written back whole before anything else happens. A
    /// failure to fetch the curriculum afterwards, or a curriculum without the
    /// module's level, degrades to [`ProgressionOutcome::ModulePassed`].
    pub async fn handle_progression(
        &self,
        module: &ModuleRef,
        score: u8,
    ) -> anyhow::Result<ProgressionOutcome> {
        let mut progress = ProgressRecord::load(self.store.as_ref())?;
        let best = progress.record(&module.subject, module.level, &module.module_id, score);
        progress.save(self.store.as_ref())?;
        tracing::debug!("stored best score {best} for {module}");

        if score < PASS_THRESHOLD {
            tracing::info!("{module}: {score}% is below {PASS_THRESHOLD}%, needs review");
            return Ok(ProgressionOutcome::NeedsReview);
        }

        let curriculum = match self.source.curriculum(&module.subject).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("level completion check for {module} failed: {e:#}");
                return Ok(ProgressionOutcome::ModulePassed);
            }
        };

        if !curriculum.levels.contains_key(&module.level) {
            tracing::warn!(
                "{} curriculum has no {} level, skipping completion check",
                module.subject,
                module.level
            );
            return Ok(ProgressionOutcome::ModulePassed);
        }

        let outcome = if check_level_completion(&curriculum, module.level, &progress) {
            ProgressionOutcome::LevelComplete
        } else {
            ProgressionOutcome::ModulePassed
        };
        tracing::info!("{module}: {score}% -> {outcome:?}");
        Ok(outcome)
    }
}
