//! Single-flight cache of decoded card images.

use crate::error::PipelineError;
use deckpress_traits::ResourceProvider;
use deckpress_types::PixelSize;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// A decoded image, shared between every sheet that draws it.
#[derive(Debug, Clone)]
pub struct CardImage {
    pub source: Arc<str>,
    pub pixels: Arc<RgbaImage>,
}

impl CardImage {
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.pixels.width(), self.pixels.height())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: String,
    size: Option<PixelSize>,
}

type Slot = Arc<OnceCell<CardImage>>;

/// Decodes each source image at most once per run.
///
/// Concurrent requests for the same path share one in-flight decode. Resized
/// variants are cached under their target size, so a filler drawn on every
/// sheet is resized once as well.
#[derive(Debug)]
pub struct ImageCache {
    provider: Arc<dyn ResourceProvider>,
    entries: Mutex<HashMap<CacheKey, Slot>>,
}

impl ImageCache {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn ResourceProvider> {
        &self.provider
    }

    /// Number of distinct entries (decodes and resizes) held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: CacheKey) -> Result<Slot, PipelineError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PipelineError::Other("Image cache lock poisoned".to_string()))?;
        Ok(Arc::clone(entries.entry(key).or_default()))
    }

    /// The image at `path` at its native size.
    pub async fn get(&self, path: &str) -> Result<CardImage, PipelineError> {
        let slot = self.slot(CacheKey { path: path.to_string(), size: None })?;
        let image = slot
            .get_or_try_init(|| async {
                let bytes = self.provider.load(path)?;
                let source: Arc<str> = Arc::from(path);
                let name = Arc::clone(&source);
                let pixels = tokio::task::spawn_blocking(move || {
                    image::load_from_memory(&bytes)
                        .map(|decoded| decoded.to_rgba8())
                        .map_err(|e| PipelineError::Decode {
                            path: name.to_string(),
                            message: e.to_string(),
                        })
                })
                .await??;
                log::debug!("Decoded '{}' ({}x{})", path, pixels.width(), pixels.height());
                Ok::<_, PipelineError>(CardImage { source, pixels: Arc::new(pixels) })
            })
            .await?;
        Ok(image.clone())
    }

    /// The image at `path` scaled to exactly `size`.
    pub async fn get_sized(&self, path: &str, size: PixelSize) -> Result<CardImage, PipelineError> {
        let original = self.get(path).await?;
        if original.size() == size {
            return Ok(original);
        }

        let slot = self.slot(CacheKey { path: path.to_string(), size: Some(size) })?;
        let image = slot
            .get_or_try_init(|| async {
                let source = Arc::clone(&original.source);
                let native = Arc::clone(&original.pixels);
                let pixels = tokio::task::spawn_blocking(move || {
                    imageops::resize(native.as_ref(), size.width, size.height, FilterType::Lanczos3)
                })
                .await?;
                log::debug!("Resized '{}' to {}x{}", source, size.width, size.height);
                Ok::<_, PipelineError>(CardImage { source, pixels: Arc::new(pixels) })
            })
            .await?;
        Ok(image.clone())
    }
}
