//! Module summaries: the static summary embedded in module records and the
//! generated summary served by a summary backend.

use serde::{Deserialize, Serialize};

use crate::error::StudyError;
use crate::model::{Module, ModuleRef, WorkedExample};
use crate::traits::SummaryService;

const IDLE_LABEL: &str = "AI Summary";
const BUSY_LABEL: &str = "Loading Summary...";

/// Summary embedded in a module record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticSummary {
    #[serde(default)]
    pub key_ideas: Vec<String>,
    #[serde(default)]
    pub important_formulas: Vec<String>,
    #[serde(default)]
    pub common_exam_traps: Vec<String>,
    #[serde(default)]
    pub exam_tip: Option<String>,
}

impl StaticSummary {
    pub fn is_empty(&self) -> bool {
        self.key_ideas.is_empty()
            && self.important_formulas.is_empty()
            && self.common_exam_traps.is_empty()
            && self.exam_tip.as_deref().map_or(true, |t| t.trim().is_empty())
    }
}

/// Summary produced on demand by the summary backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSummary {
    #[serde(default)]
    pub module_name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub module_summary: String,
    #[serde(default)]
    pub key_concepts: Vec<String>,
    #[serde(default)]
    pub intuition: String,
    #[serde(default)]
    pub worked_examples: Vec<WorkedExample>,
    #[serde(default)]
    pub common_mistakes: Vec<String>,
    #[serde(default)]
    pub exam_takeaways: Vec<String>,
    #[serde(default)]
    pub real_world_applications: Vec<String>,
}

/// Body of `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub subject: String,
    pub module_id: String,
    pub level: String,
}

impl From<&ModuleRef> for SummaryRequest {
    fn from(module: &ModuleRef) -> Self {
        Self {
            subject: module.subject.clone(),
            module_id: module.module_id.clone(),
            level: module.level.to_string(),
        }
    }
}

/// Envelope returned by the summary backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub success: bool,
    #[serde(default)]
    pub summary: Option<GeneratedSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SummaryResponse {
    /// Unwrap the envelope, turning `success: false` into a missing-data error.
    pub fn into_result(self) -> Result<GeneratedSummary, StudyError> {
        match (self.success, self.summary) {
            (true, Some(summary)) => Ok(summary),
            (true, None) => Err(StudyError::InvalidContent(
                "summary response has no summary".into(),
            )),
            (false, _) => Err(StudyError::NotFound(
                self.error.unwrap_or_else(|| "summary".to_string()),
            )),
        }
    }
}

/// State of the control that requests a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub enabled: bool,
    pub label: String,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            enabled: true,
            label: IDLE_LABEL.to_string(),
        }
    }
}

/// Page controller for the summary panel.
///
/// The trigger is disabled for the duration of a request and restored on
/// every exit path. `on_change` observes each trigger transition.
#[derive(Debug, Default)]
pub struct SummaryPanel {
    trigger: Trigger,
    visible: bool,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Show the summary embedded in the module record.
    pub fn show_static(
        &mut self,
        module: Option<&Module>,
        on_change: &mut dyn FnMut(&Trigger),
    ) -> anyhow::Result<StaticSummary> {
        let module = module.ok_or(StudyError::MissingSelection("module"))?;
        let summary = module
            .ai_summary
            .clone()
            .ok_or_else(|| StudyError::NotFound("an AI summary for this module".into()))?;

        self.begin(on_change);
        self.finish(on_change);
        self.visible = true;
        Ok(summary)
    }

    /// Request a generated summary from the backend.
    pub async fn show_generated(
        &mut self,
        service: &dyn SummaryService,
        module: &ModuleRef,
        on_change: &mut dyn FnMut(&Trigger),
    ) -> anyhow::Result<GeneratedSummary> {
        self.begin(on_change);
        let result = service.summarize(&SummaryRequest::from(module)).await;
        self.finish(on_change);

        match result {
            Ok(summary) => {
                self.visible = true;
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("summary request for {module} failed: {e:#}");
                Err(e)
            }
        }
    }

    fn begin(&mut self, on_change: &mut dyn FnMut(&Trigger)) {
        self.trigger = Trigger {
            enabled: false,
            label: BUSY_LABEL.to_string(),
        };
        on_change(&self.trigger);
    }

    fn finish(&mut self, on_change: &mut dyn FnMut(&Trigger)) {
        self.trigger = Trigger::default();
        on_change(&self.trigger);
    }
}
