//! What a run produced, for logging and for callers that want to inspect it.

use deckpress_types::{AtlasPageName, SheetId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The source directory held no matching images.
    EmptyGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupOutcome {
    Rendered { cards: usize, sheets: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: String,
    pub label: String,
    pub outcome: GroupOutcome,
}

/// One printed front/back page pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub id: SheetId,
    pub label: String,
    /// Cards on the sheet, fillers included.
    pub total_cards: usize,
    pub filler_cards: usize,
    pub front_path: String,
    pub back_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRunSummary {
    pub groups: Vec<GroupSummary>,
    pub sheets: Vec<SheetSummary>,
    /// Path of the consolidated PDF; `None` when no sheet was produced.
    pub document: Option<String>,
    pub page_count: usize,
}

impl SheetRunSummary {
    pub fn skipped_groups(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups
            .iter()
            .filter(|group| matches!(group.outcome, GroupOutcome::Skipped(_)))
    }

    pub fn log_overview(&self) {
        let Some(document) = &self.document else {
            return;
        };
        log::info!("Print sheet overview:");
        for sheet in &self.sheets {
            log::info!(
                "- {} [{}] -> {} card(s) ({} / {})",
                sheet.id,
                sheet.label,
                sheet.total_cards,
                file_name(&sheet.front_path),
                file_name(&sheet.back_path)
            );
        }
        log::info!("Saved consolidated PDF with {} pages at {}", self.page_count, document);
        log::info!("Print double-sided (flip on long edge) to keep backs aligned.");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasPageSummary {
    pub name: AtlasPageName,
    pub path: String,
    pub cards: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasSummary {
    pub prefix: String,
    pub pages: Vec<AtlasPageSummary>,
    pub skipped: Option<SkipReason>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasRunSummary {
    pub atlases: Vec<AtlasSummary>,
}

impl AtlasRunSummary {
    pub fn page_count(&self) -> usize {
        self.atlases.iter().map(|atlas| atlas.pages.len()).sum()
    }
}

/// Results of `DeckPipeline::run`; a part is `None` when it was not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub atlases: Option<AtlasRunSummary>,
    pub sheets: Option<SheetRunSummary>,
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
