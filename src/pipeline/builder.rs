// src/pipeline/builder.rs
use super::context::PipelineContext;
use super::DeckPipeline;
use crate::cache::ImageCache;
use crate::config::RunConfig;
use crate::error::PipelineError;
use deckpress_resource::{FilesystemOutputSink, FilesystemResourceProvider};
use deckpress_traits::{OutputSink, ResourceProvider};
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `DeckPipeline`.
pub struct PipelineBuilder {
    config: Option<RunConfig>,
    resource_provider: Option<Arc<dyn ResourceProvider>>,
    output_sink: Option<Arc<dyn OutputSink>>,
    image_cache: Option<Arc<ImageCache>>,
    max_in_flight: usize,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            config: None,
            resource_provider: None,
            output_sink: None,
            image_cache: None,
            max_in_flight: num_cpus::get().max(1),
        }
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads and validates a JSON run configuration.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = Some(RunConfig::from_file(path)?);
        Ok(self)
    }

    /// Reads card images from a directory; config paths are relative to it.
    pub fn with_asset_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.resource_provider = Some(Arc::new(FilesystemResourceProvider::new(root)));
        self
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resource_provider = Some(provider);
        self
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_sink = Some(Arc::new(FilesystemOutputSink::new(dir)));
        self
    }

    pub fn with_output_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.output_sink = Some(sink);
        self
    }

    /// Shares an existing cache, e.g. across several runs over the same assets.
    /// It must read from the same provider as the pipeline.
    pub fn with_image_cache(mut self, cache: Arc<ImageCache>) -> Self {
        self.image_cache = Some(cache);
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn build(self) -> Result<DeckPipeline, PipelineError> {
        let config = self.config.ok_or_else(|| {
            PipelineError::Config("No run configuration has been set. Use `with_config` or `with_config_file`.".to_string())
        })?;
        config.validate()?;

        let resource_provider = self.resource_provider.ok_or_else(|| {
            PipelineError::Config("No asset source has been set. Use `with_asset_root`.".to_string())
        })?;
        let output_sink = self.output_sink.ok_or_else(|| {
            PipelineError::Config("No output destination has been set. Use `with_output_dir`.".to_string())
        })?;
        let image_cache = self
            .image_cache
            .unwrap_or_else(|| Arc::new(ImageCache::new(Arc::clone(&resource_provider))));

        log::debug!(
            "Building pipeline: assets from {}, output to {}, {} page(s) in flight",
            resource_provider.name(),
            output_sink.name(),
            self.max_in_flight
        );

        let context = PipelineContext {
            config: Arc::new(config),
            resource_provider,
            output_sink,
            image_cache,
            max_in_flight: self.max_in_flight,
        };
        Ok(DeckPipeline::new(context))
    }
}
