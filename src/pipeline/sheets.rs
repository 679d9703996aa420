//! Double-sided print sheets and the consolidated PDF.
//!
//! A run goes through three phases. Every group is planned first, which
//! checks all backs and fillers against the assets. Sheets and the PDF are
//! then rendered in memory. Nothing is written under `print/` until both
//! have succeeded.

use super::context::PipelineContext;
use super::summary::{GroupOutcome, GroupSummary, SheetRunSummary, SheetSummary, SkipReason};
use crate::back::{resolve_filler, BackResolver};
use crate::cache::{CardImage, ImageCache};
use crate::config::{CardGroupConfig, RunConfig};
use crate::error::PipelineError;
use crate::render::{decode_png, encode_png, Canvas, DocumentRenderer, LopdfDocumentRenderer, RasterCanvas, RenderError};
use crate::source::list_sources;
use deckpress_layout::{compute_layout, compute_positions, page_pixels, plan_batches, GridSpec};
use deckpress_traits::ResourceProvider;
use deckpress_types::{CardPair, Color, Layout, PageSize, PixelSize, SheetId};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const PRINT_DIR: &str = "print";

/// Where a group is in its trip through the sheet stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupStage {
    Listing,
    ResolvingBacks,
    Planning,
    Rendering,
    Done,
}

impl fmt::Display for GroupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupStage::Listing => "listing fronts",
            GroupStage::ResolvingBacks => "resolving backs",
            GroupStage::Planning => "planning batches",
            GroupStage::Rendering => "rendering sheets",
            GroupStage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(group: &CardGroupConfig, stage: GroupStage) {
    log::debug!("[{}] {}", group.key, stage);
}

/// A group's batches, ready to render.
#[derive(Debug)]
pub(crate) struct GroupPlan {
    pub layout: Layout,
    pub cards: usize,
    pub batches: Vec<Vec<CardPair>>,
}

/// Lists, pairs and batches one group's cards. `None` means the group has no
/// fronts and is skipped.
pub(crate) fn plan_group(
    provider: &dyn ResourceProvider,
    config: &RunConfig,
    group: &CardGroupConfig,
    page: PixelSize,
) -> Result<Option<GroupPlan>, PipelineError> {
    enter(group, GroupStage::Listing);
    let fronts = list_sources(provider, &group.source)?;
    if fronts.is_empty() {
        return Ok(None);
    }

    enter(group, GroupStage::ResolvingBacks);
    let mut resolver = BackResolver::new(provider, group.back_strategy.as_ref());
    let pairs = fronts
        .into_iter()
        .map(|front| {
            let back = resolver.resolve(&front)?;
            Ok(CardPair::new(front, back))
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    enter(group, GroupStage::Planning);
    let card = group.dimensions().resolve_size(config.dpi);
    let spec = GridSpec::new(page, card, group.gap.unwrap_or(config.default_gap_px))
        .with_columns(group.columns)
        .with_rows(group.rows);
    let layout = compute_layout(&spec)?;
    let filler = resolve_filler(provider, group)?;

    let cards = pairs.len();
    let batches = plan_batches(pairs, layout.cards_per_sheet, filler.as_ref(), config.extra_filler_sheets);
    Ok(Some(GroupPlan { layout, cards, batches }))
}

/// Plans of every configured group, in group order. `None` marks an empty group.
#[derive(Debug)]
pub(crate) struct SheetPlan {
    groups: Vec<Option<GroupPlan>>,
}

/// Plans every group before anything is rendered, so a missing back or
/// filler in any group fails the run up front.
pub(crate) fn plan_sheets(context: &PipelineContext) -> Result<SheetPlan, PipelineError> {
    let config = context.config.as_ref();
    let provider = context.resource_provider.as_ref();
    let page = page_pixels(&config.page, config.dpi);
    log::info!(
        "Compiling print sheets for {} group(s) on {}x{}px pages",
        config.groups.len(),
        page.width,
        page.height
    );

    let mut groups = Vec::with_capacity(config.groups.len());
    for group in &config.groups {
        let plan = plan_group(provider, config, group, page)?;
        match &plan {
            Some(plan) => log::info!(
                "Preparing {} sheet(s) for {} ({} cards + fillers).",
                plan.batches.len(),
                group.label(),
                plan.cards
            ),
            None => log::warn!("No cards found for {}, skipping.", group.label()),
        }
        groups.push(plan);
    }
    Ok(SheetPlan { groups })
}

/// Identifier and output paths of one sheet.
#[derive(Debug, Clone)]
struct SheetTarget {
    id: SheetId,
    front_path: String,
    back_path: String,
}

impl SheetTarget {
    fn new(id: SheetId) -> Self {
        let front_path = format!("{}/{}", PRINT_DIR, id.front_file_name());
        let back_path = format!("{}/{}", PRINT_DIR, id.back_file_name());
        Self { id, front_path, back_path }
    }
}

/// The two encoded faces of one sheet.
#[derive(Debug)]
struct RenderedSheet {
    front_png: Vec<u8>,
    back_png: Vec<u8>,
}

/// Composites one batch onto a front page and its mirrored back page.
async fn render_sheet(
    cache: &ImageCache,
    batch: &[CardPair],
    layout: &Layout,
    background: Color,
    target: SheetTarget,
) -> Result<RenderedSheet, PipelineError> {
    let positions = compute_positions(batch.len(), layout)?;
    let card_size = layout.card_size();

    let mut faces: Vec<(CardImage, CardImage)> = Vec::with_capacity(batch.len());
    for card in batch {
        let front = cache.get_sized(&card.front, card_size).await?;
        let back = cache.get_sized(&card.back, card_size).await?;
        faces.push((front, back));
    }

    let page = layout.page;
    let rendered = tokio::task::spawn_blocking(move || {
        let mut front = RasterCanvas::new(page);
        let mut back = RasterCanvas::new(page);
        front.fill(background);
        back.fill(background);
        for ((front_image, back_image), position) in faces.iter().zip(&positions) {
            front.draw_image(&front_image.pixels, position.front_x, position.front_y);
            back.draw_image(&back_image.pixels, position.back_x, position.back_y);
        }
        Ok::<_, PipelineError>(RenderedSheet {
            front_png: encode_png(front.as_image()).map_err(|e| PipelineError::encode(&target.front_path, e))?,
            back_png: encode_png(back.as_image()).map_err(|e| PipelineError::encode(&target.back_path, e))?,
        })
    })
    .await??;
    Ok(rendered)
}

/// Renders every batch of a group concurrently, returning sheets in batch order.
async fn render_group(
    context: &PipelineContext,
    plan: &GroupPlan,
    targets: &[SheetTarget],
) -> Result<Vec<RenderedSheet>, PipelineError> {
    let semaphore = Arc::new(Semaphore::new(context.max_in_flight));
    let background = context.config.sheet_background;
    let mut tasks: JoinSet<Result<(usize, RenderedSheet), PipelineError>> = JoinSet::new();

    for (index, (batch, target)) in plan.batches.iter().zip(targets).enumerate() {
        let batch = batch.clone();
        let target = target.clone();
        let layout = plan.layout;
        let cache = Arc::clone(&context.image_cache);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Other(format!("Render queue closed: {}", e)))?;
            let sheet = render_sheet(&cache, &batch, &layout, background, target).await?;
            Ok((index, sheet))
        });
    }

    let mut rendered: Vec<Option<RenderedSheet>> = plan.batches.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, sheet) = joined??;
        rendered[index] = Some(sheet);
    }
    rendered
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| PipelineError::Other("A sheet render task produced no result".to_string()))
}

/// Assembles one page per buffer, in order, into the PDF that will be written
/// at `target`.
fn assemble_document(page: PageSize, pages: &[Arc<Vec<u8>>], target: &str) -> Result<(Vec<u8>, usize), PipelineError> {
    let encode = |e: RenderError| PipelineError::encode(target, e);
    let mut renderer: Box<dyn DocumentRenderer> = Box::new(LopdfDocumentRenderer::new(&page));
    renderer.begin_document().map_err(encode)?;
    for png in pages {
        // Decode one page at a time so only a single raster is resident.
        let raster = decode_png(png).map_err(encode)?;
        renderer.render_page(&raster).map_err(encode)?;
    }
    let page_count = renderer.page_count();
    let pdf = renderer.finalize().map_err(encode)?;
    Ok((pdf, page_count))
}

/// Encoded sheets and PDF, held until the whole run has succeeded.
#[derive(Debug)]
pub(crate) struct RenderedSheets {
    summary: SheetRunSummary,
    /// Front then back of every sheet, in page order.
    files: Vec<(String, Arc<Vec<u8>>)>,
    document: Option<Vec<u8>>,
}

/// Renders every planned group and assembles the PDF without touching the
/// output sink.
///
/// Groups run one after another so sheet numbers follow group order; the
/// sheets of one group render concurrently.
pub(crate) async fn render_sheets(context: &PipelineContext, plan: SheetPlan) -> Result<RenderedSheets, PipelineError> {
    let config = Arc::clone(&context.config);
    let mut summary = SheetRunSummary::default();
    let mut files: Vec<(String, Arc<Vec<u8>>)> = Vec::new();
    let mut next_sequence = 1usize;

    for (group, planned) in config.groups.iter().zip(plan.groups) {
        let Some(plan) = planned else {
            summary.groups.push(GroupSummary {
                key: group.key.clone(),
                label: group.label().to_string(),
                outcome: GroupOutcome::Skipped(SkipReason::EmptyGroup),
            });
            continue;
        };

        // Numbered up front so identifiers never depend on task completion order.
        let targets: Vec<SheetTarget> = (0..plan.batches.len())
            .map(|offset| SheetTarget::new(SheetId::new(next_sequence + offset, &group.key)))
            .collect();
        next_sequence += plan.batches.len();

        enter(group, GroupStage::Rendering);
        let rendered = render_group(context, &plan, &targets).await?;

        for ((target, batch), sheet) in targets.into_iter().zip(&plan.batches).zip(rendered) {
            summary.sheets.push(SheetSummary {
                id: target.id,
                label: group.label().to_string(),
                total_cards: batch.len(),
                filler_cards: batch.iter().filter(|card| card.is_filler).count(),
                front_path: target.front_path.clone(),
                back_path: target.back_path.clone(),
            });
            files.push((target.front_path, Arc::new(sheet.front_png)));
            files.push((target.back_path, Arc::new(sheet.back_png)));
        }

        summary.groups.push(GroupSummary {
            key: group.key.clone(),
            label: group.label().to_string(),
            outcome: GroupOutcome::Rendered { cards: plan.cards, sheets: plan.batches.len() },
        });
        enter(group, GroupStage::Done);
    }

    if files.is_empty() {
        return Ok(RenderedSheets { summary, files, document: None });
    }

    let document = format!("{}/{}.pdf", PRINT_DIR, config.document_name);
    let pages: Vec<Arc<Vec<u8>>> = files.iter().map(|(_, png)| Arc::clone(png)).collect();
    let page_size = config.page;
    let target = document.clone();
    let (pdf, page_count) =
        tokio::task::spawn_blocking(move || assemble_document(page_size, &pages, &target)).await??;

    summary.document = Some(document);
    summary.page_count = page_count;
    Ok(RenderedSheets { summary, files, document: Some(pdf) })
}

/// Replaces the contents of `print/` with the rendered sheets and PDF.
pub(crate) fn commit_sheets(context: &PipelineContext, rendered: RenderedSheets) -> Result<SheetRunSummary, PipelineError> {
    let sink = context.output_sink.as_ref();
    sink.reset_dir(PRINT_DIR)?;
    for (path, png) in &rendered.files {
        sink.write(path, png)?;
        log::debug!("Wrote {}", path);
    }

    let summary = rendered.summary;
    match (&summary.document, rendered.document) {
        (Some(path), Some(pdf)) => {
            sink.write(path, &pdf)?;
            summary.log_overview();
        }
        _ => log::warn!("No sheets were generated. Make sure the card generators ran first."),
    }
    Ok(summary)
}

/// Produces every group's print sheets, writes them under `print/` and bundles
/// them into `print/{documentName}.pdf`.
pub async fn compile_sheets(context: &PipelineContext) -> Result<SheetRunSummary, PipelineError> {
    let plan = plan_sheets(context)?;
    let rendered = render_sheets(context, plan).await?;
    commit_sheets(context, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceSpec;
    use deckpress_traits::InMemoryResourceProvider;
    use deckpress_types::{BackStrategy, DEFAULT_DPI};

    fn provider(paths: &[&str]) -> InMemoryResourceProvider {
        let provider = InMemoryResourceProvider::new();
        for path in paths {
            provider.add(*path, vec![0]).unwrap();
        }
        provider
    }

    fn tickets() -> CardGroupConfig {
        let mut group = CardGroupConfig::new("tickets", SourceSpec::new("tickets"), PixelSize::new(490, 490));
        group.print_width_mm = Some(85.0);
        group.print_height_mm = Some(85.0);
        group.back_strategy = Some(BackStrategy::StaticImage { path: "misc/work-deck.png".into() });
        group.empty_card_path = Some("misc/ticket-empty.png".into());
        group
    }

    fn a4() -> PixelSize {
        page_pixels(&PageSize::A4, DEFAULT_DPI)
    }

    #[test]
    fn test_plan_pads_and_appends_filler_sheet() {
        let provider = provider(&[
            "tickets/t-1.png",
            "tickets/t-2.png",
            "tickets/t-10.png",
            "misc/work-deck.png",
            "misc/ticket-empty.png",
        ]);
        let plan = plan_group(&provider, &RunConfig::default(), &tickets(), a4()).unwrap().unwrap();

        assert_eq!((plan.layout.columns, plan.layout.rows), (2, 3));
        assert_eq!(plan.cards, 3);
        assert_eq!(plan.batches.len(), 2);
        assert!(plan.batches.iter().all(|batch| batch.len() == 6));
        assert_eq!(plan.batches[0][2].front, "tickets/t-10.png");
        assert_eq!(plan.batches[0][0].back, "misc/work-deck.png");
        assert_eq!(plan.batches[0].iter().filter(|card| card.is_filler).count(), 3);
        assert!(plan.batches[1].iter().all(|card| card.is_filler));
        assert_eq!(plan.batches[1][0].back, "misc/work-deck.png");
    }

    #[test]
    fn test_plan_without_filler_keeps_short_batch() {
        let provider = provider(&["tickets/a.png", "misc/work-deck.png"]);
        let mut group = tickets();
        group.empty_card_path = None;
        let plan = plan_group(&provider, &RunConfig::default(), &group, a4()).unwrap().unwrap();
        assert_eq!(plan.batches.len(), 1);
        assert_eq!(plan.batches[0].len(), 1);
    }

    #[test]
    fn test_empty_group_is_skipped_before_backs_are_checked() {
        let provider = provider(&[]);
        assert!(plan_group(&provider, &RunConfig::default(), &tickets(), a4()).unwrap().is_none());
    }

    #[test]
    fn test_missing_static_back_aborts_planning() {
        let provider = provider(&["tickets/a.png", "misc/ticket-empty.png"]);
        let result = plan_group(&provider, &RunConfig::default(), &tickets(), a4());
        assert!(matches!(result, Err(PipelineError::MissingAsset { .. })));
    }

    #[test]
    fn test_unreadable_page_is_reported_against_document() {
        let pages = vec![Arc::new(b"not a png".to_vec())];
        match assemble_document(PageSize::A4, &pages, "print/cards.pdf") {
            Err(err @ PipelineError::Encode { .. }) => {
                assert!(matches!(&err, PipelineError::Encode { target, .. } if target == "print/cards.pdf"));
                assert!(err.to_string().contains("print/cards.pdf"));
            }
            other => panic!("expected an encode error, got {other:?}"),
        }
    }

    #[test]
    fn test_pages_assemble_in_order() {
        let png = encode_png(&image::RgbaImage::new(4, 4)).unwrap();
        let pages = vec![Arc::new(png.clone()), Arc::new(png)];
        let (pdf, page_count) = assemble_document(PageSize::A4, &pages, "print/cards.pdf").unwrap();
        assert_eq!(page_count, 2);
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_group_stages_end_in_done() {
        let trail = [
            GroupStage::Listing,
            GroupStage::ResolvingBacks,
            GroupStage::Planning,
            GroupStage::Rendering,
            GroupStage::Done,
        ];
        assert!(trail.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(GroupStage::Done.to_string(), "done");
    }

    #[test]
    fn test_group_overrides_reach_layout() {
        let provider = provider(&["tickets/a.png", "misc/work-deck.png", "misc/ticket-empty.png"]);
        let mut group = tickets();
        group.columns = Some(1);
        group.rows = Some(1);
        group.gap = Some(0);
        let plan = plan_group(&provider, &RunConfig::default(), &group, a4()).unwrap().unwrap();
        assert_eq!(plan.layout.cards_per_sheet, 1);
        assert_eq!(plan.layout.gap, 0);
        assert_eq!(plan.batches.len(), 2);
    }
}
