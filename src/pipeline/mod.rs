//! Orchestration of a compile run: atlases, print sheets, or both.

pub mod atlases;
pub mod builder;
pub mod context;
pub mod sheets;
pub mod summary;

pub use self::builder::PipelineBuilder;
pub use self::context::PipelineContext;
pub use self::summary::{
    AtlasPageSummary, AtlasRunSummary, AtlasSummary, GroupOutcome, GroupSummary, RunSummary, SheetRunSummary,
    SheetSummary, SkipReason,
};

use crate::error::PipelineError;

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunTarget {
    Atlases,
    Sheets,
    #[default]
    All,
}

impl RunTarget {
    fn atlases(self) -> bool {
        matches!(self, RunTarget::Atlases | RunTarget::All)
    }

    fn sheets(self) -> bool {
        matches!(self, RunTarget::Sheets | RunTarget::All)
    }
}

/// A configured compile run. Build one with `PipelineBuilder`.
pub struct DeckPipeline {
    context: PipelineContext,
}

impl DeckPipeline {
    pub(crate) fn new(context: PipelineContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub async fn compile_atlases(&self) -> Result<AtlasRunSummary, PipelineError> {
        atlases::compile_atlases(&self.context).await
    }

    pub async fn compile_sheets(&self) -> Result<SheetRunSummary, PipelineError> {
        sheets::compile_sheets(&self.context).await
    }

    /// Runs the requested stages, atlases first. The first error aborts the run.
    ///
    /// Sheet groups are planned before either stage renders, and nothing is
    /// written until both stages have rendered, so a failed run leaves the
    /// output directory as it was.
    pub async fn run(&self, target: RunTarget) -> Result<RunSummary, PipelineError> {
        let sheet_plan = if target.sheets() {
            Some(sheets::plan_sheets(&self.context)?)
        } else {
            None
        };
        let rendered_atlases = if target.atlases() {
            Some(atlases::render_atlases(&self.context).await?)
        } else {
            None
        };
        let rendered_sheets = match sheet_plan {
            Some(plan) => Some(sheets::render_sheets(&self.context, plan).await?),
            None => None,
        };

        let mut summary = RunSummary::default();
        if let Some(rendered) = rendered_atlases {
            summary.atlases = Some(atlases::commit_atlases(&self.context, rendered)?);
        }
        if let Some(rendered) = rendered_sheets {
            summary.sheets = Some(sheets::commit_sheets(&self.context, rendered)?);
        }
        log::debug!("Image cache holds {} entries", self.context.image_cache.len());
        Ok(summary)
    }
}
