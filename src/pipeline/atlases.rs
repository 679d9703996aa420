//! Texture atlases packed from directories of card images.

use super::context::PipelineContext;
use super::summary::{AtlasPageSummary, AtlasRunSummary, AtlasSummary, SkipReason};
use crate::cache::ImageCache;
use crate::config::AtlasConfig;
use crate::error::PipelineError;
use crate::render::{encode_png, Canvas, RasterCanvas};
use crate::source::list_sources;
use deckpress_layout::{pack, AtlasGrid};
use deckpress_types::{AtlasPageName, Color, PixelSize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const ATLAS_DIR: &str = "atlases";

/// An atlas page detached from the borrowed source list so it can move into a task.
#[derive(Debug, Clone)]
struct AtlasJob {
    name: AtlasPageName,
    path: String,
    cells: Vec<(String, u32, u32)>,
}

async fn render_atlas_page(
    cache: &ImageCache,
    job: &AtlasJob,
    grid: AtlasGrid,
    background: Color,
) -> Result<Vec<u8>, PipelineError> {
    let mut images = Vec::with_capacity(job.cells.len());
    for (path, x, y) in &job.cells {
        images.push((cache.get_sized(path, grid.cell).await?, *x, *y));
    }

    let target = job.path.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut canvas = RasterCanvas::new(grid.canvas_size());
        // Background first, so transparent card corners never show stale pixels.
        canvas.fill(background);
        for (image, x, y) in &images {
            canvas.draw_image(&image.pixels, i64::from(*x), i64::from(*y));
        }
        encode_png(canvas.as_image()).map_err(|e| PipelineError::encode(target, e))
    })
    .await??;
    Ok(bytes)
}

/// Packs and renders every page of one atlas series, returning the encoded
/// pages in page order.
async fn render_atlas(
    context: &PipelineContext,
    atlas: &AtlasConfig,
) -> Result<(AtlasSummary, Vec<Vec<u8>>), PipelineError> {
    let sources = list_sources(context.resource_provider.as_ref(), &atlas.source)?;
    if sources.is_empty() {
        log::warn!("No cards found for {}, skipping.", atlas.prefix);
        let summary = AtlasSummary {
            prefix: atlas.prefix.clone(),
            pages: Vec::new(),
            skipped: Some(SkipReason::EmptyGroup),
        };
        return Ok((summary, Vec::new()));
    }

    let grid = AtlasGrid::new(
        atlas.columns,
        atlas.rows,
        PixelSize::new(atlas.card_width, atlas.card_height),
    )?;
    let locale = context.config.locale_tag();
    let jobs: Vec<AtlasJob> = pack(&sources, &grid, &atlas.prefix, &locale)
        .into_iter()
        .map(|page| AtlasJob {
            path: format!("{}/{}/{}", ATLAS_DIR, locale, page.name.file_name()),
            name: page.name,
            cells: page.cells.iter().map(|cell| (cell.item.clone(), cell.x, cell.y)).collect(),
        })
        .collect();
    log::debug!("[{}] {} card(s) over {} atlas page(s)", atlas.prefix, sources.len(), jobs.len());

    let semaphore = Arc::new(Semaphore::new(context.max_in_flight));
    let mut tasks: JoinSet<Result<(usize, Vec<u8>), PipelineError>> = JoinSet::new();
    for (index, job) in jobs.iter().enumerate() {
        let job = job.clone();
        let cache = Arc::clone(&context.image_cache);
        let semaphore = Arc::clone(&semaphore);
        let background = atlas.background;
        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| PipelineError::Other(format!("Render queue closed: {}", e)))?;
            let bytes = render_atlas_page(&cache, &job, grid, background).await?;
            Ok((index, bytes))
        });
    }

    let mut encoded: Vec<Option<Vec<u8>>> = jobs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, bytes) = joined??;
        encoded[index] = Some(bytes);
    }

    let mut pages = Vec::with_capacity(jobs.len());
    let mut files = Vec::with_capacity(jobs.len());
    for (job, bytes) in jobs.into_iter().zip(encoded) {
        let bytes = bytes.ok_or_else(|| PipelineError::Other("An atlas render task produced no result".to_string()))?;
        files.push(bytes);
        pages.push(AtlasPageSummary {
            cards: job.cells.len(),
            name: job.name,
            path: job.path,
        });
    }

    let summary = AtlasSummary {
        prefix: atlas.prefix.clone(),
        pages,
        skipped: None,
    };
    Ok((summary, files))
}

/// Encoded atlas pages, held until the whole run has succeeded.
#[derive(Debug, Default)]
pub(crate) struct RenderedAtlases {
    summary: AtlasRunSummary,
    /// One buffer per summary page, in the order the summary lists them.
    files: Vec<Vec<u8>>,
}

/// Renders every configured atlas series without touching the output sink.
pub(crate) async fn render_atlases(context: &PipelineContext) -> Result<RenderedAtlases, PipelineError> {
    let config = Arc::clone(&context.config);
    log::info!(
        "Compiling {} atlas series for locale '{}'",
        config.atlases.len(),
        config.locale_tag()
    );

    let mut rendered = RenderedAtlases::default();
    for atlas in &config.atlases {
        let (summary, files) = render_atlas(context, atlas).await?;
        rendered.summary.atlases.push(summary);
        rendered.files.extend(files);
    }
    Ok(rendered)
}

/// Writes the rendered pages into `atlases/{locale}/`.
pub(crate) fn commit_atlases(context: &PipelineContext, rendered: RenderedAtlases) -> Result<AtlasRunSummary, PipelineError> {
    let pages = rendered.summary.atlases.iter().flat_map(|atlas| &atlas.pages);
    for (page, bytes) in pages.zip(&rendered.files) {
        context.output_sink.write(&page.path, bytes)?;
        log::info!("Saved {} with {} cards.", page.name.file_name(), page.cards);
    }
    Ok(rendered.summary)
}

/// Builds every configured atlas series into `atlases/{locale}/`.
pub async fn compile_atlases(context: &PipelineContext) -> Result<AtlasRunSummary, PipelineError> {
    let rendered = render_atlases(context).await?;
    commit_atlases(context, rendered)
}
