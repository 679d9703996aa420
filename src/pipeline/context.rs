use crate::cache::ImageCache;
use crate::config::RunConfig;
use deckpress_traits::{OutputSink, ResourceProvider};
use std::sync::Arc;

/// A container for all shared, read-only resources needed during a run.
/// Created once by the `PipelineBuilder` and handed to both stages.
#[derive(Clone)]
pub struct PipelineContext {
    pub config: Arc<RunConfig>,
    pub resource_provider: Arc<dyn ResourceProvider>,
    pub output_sink: Arc<dyn OutputSink>,
    /// Shared by sheets and atlases so a back drawn in both is decoded once.
    pub image_cache: Arc<ImageCache>,
    /// Upper bound on pages composited at the same time.
    pub max_in_flight: usize,
}
