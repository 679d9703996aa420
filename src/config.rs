//! Run configuration: page geometry, card groups and atlas definitions.

use crate::error::PipelineError;
use crate::source::SourceSpec;
use deckpress_layout::CardDimensions;
use deckpress_types::{BackStrategy, Color, PageSize, PixelSize, DEFAULT_DPI};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

/// About 2mm at print resolution.
fn default_gap() -> u32 {
    (f64::from(DEFAULT_DPI) * 0.08).round() as u32
}

fn default_extra_filler_sheets() -> usize {
    1
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_document_name() -> String {
    "double-sided-cards".to_string()
}

fn default_atlas_cell() -> u32 {
    490
}

fn default_atlas_columns() -> usize {
    10
}

fn default_atlas_rows() -> usize {
    7
}

fn default_atlas_background() -> Color {
    Color::ATLAS_BACKDROP
}

/// Everything one compile run needs to know.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    #[serde(default)]
    pub page: PageSize,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_gap")]
    pub default_gap_px: u32,
    /// All-filler sheets appended to every group that has a filler card.
    #[serde(default = "default_extra_filler_sheets")]
    pub extra_filler_sheets: usize,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// File stem of the consolidated PDF.
    #[serde(default = "default_document_name")]
    pub document_name: String,
    #[serde(default)]
    pub sheet_background: Color,
    #[serde(default)]
    pub groups: Vec<CardGroupConfig>,
    #[serde(default)]
    pub atlases: Vec<AtlasConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            dpi: default_dpi(),
            default_gap_px: default_gap(),
            extra_filler_sheets: default_extra_filler_sheets(),
            locale: default_locale(),
            document_name: default_document_name(),
            sheet_background: Color::WHITE,
            groups: Vec::new(),
            atlases: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        let config: RunConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json(&source)
    }

    /// The locale tag used in output names and directories.
    pub fn locale_tag(&self) -> String {
        self.locale.to_lowercase()
    }

    /// Rejects configurations that cannot produce a valid layout, before any I/O.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.dpi == 0 {
            return Err(PipelineError::Config("dpi must be positive".to_string()));
        }
        if self.page.width_mm <= 0.0 || self.page.height_mm <= 0.0 {
            return Err(PipelineError::Config(format!(
                "page size must be positive, got {}x{}mm",
                self.page.width_mm, self.page.height_mm
            )));
        }
        if self.locale.trim().is_empty() {
            return Err(PipelineError::Config("locale must not be empty".to_string()));
        }
        let name = self.document_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(PipelineError::Config(format!(
                "documentName must be a plain file stem, got '{}'",
                self.document_name
            )));
        }

        let mut keys = HashSet::new();
        for group in &self.groups {
            if group.key.trim().is_empty() {
                return Err(PipelineError::Config("card group key must not be empty".to_string()));
            }
            if !keys.insert(group.key.as_str()) {
                return Err(PipelineError::Config(format!("duplicate card group key '{}'", group.key)));
            }
            let size = group.dimensions().resolve_size(self.dpi);
            if size.width == 0 || size.height == 0 {
                return Err(PipelineError::Config(format!(
                    "card group '{}' resolves to a non-positive card size {}x{}px",
                    group.key, size.width, size.height
                )));
            }
        }

        for atlas in &self.atlases {
            if atlas.prefix.trim().is_empty() {
                return Err(PipelineError::Config("atlas prefix must not be empty".to_string()));
            }
            if atlas.card_width == 0 || atlas.card_height == 0 || atlas.columns == 0 || atlas.rows == 0 {
                return Err(PipelineError::Config(format!(
                    "atlas '{}' needs a positive cell size and grid",
                    atlas.prefix
                )));
            }
        }
        Ok(())
    }
}

/// A category of cards printed together (e.g. tickets, roles).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroupConfig {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub source: SourceSpec,
    /// Pixel size the card images were rendered at.
    pub card_width: u32,
    pub card_height: u32,
    pub print_width_mm: Option<f64>,
    pub print_height_mm: Option<f64>,
    pub print_width_px: Option<u32>,
    pub print_height_px: Option<u32>,
    pub gap: Option<u32>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub back_strategy: Option<BackStrategy>,
    pub empty_card_path: Option<String>,
    pub empty_card_back_path: Option<String>,
}

impl CardGroupConfig {
    pub fn new(key: impl Into<String>, source: SourceSpec, card_size: PixelSize) -> Self {
        Self {
            key: key.into(),
            label: None,
            source,
            card_width: card_size.width,
            card_height: card_size.height,
            print_width_mm: None,
            print_height_mm: None,
            print_width_px: None,
            print_height_px: None,
            gap: None,
            columns: None,
            rows: None,
            back_strategy: None,
            empty_card_path: None,
            empty_card_back_path: None,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    pub fn dimensions(&self) -> CardDimensions {
        CardDimensions {
            base: PixelSize::new(self.card_width, self.card_height),
            print_width_mm: self.print_width_mm,
            print_height_mm: self.print_height_mm,
            print_width_px: self.print_width_px,
            print_height_px: self.print_height_px,
        }
    }
}

/// One atlas series packed from a directory of card images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasConfig {
    pub prefix: String,
    pub source: SourceSpec,
    #[serde(default = "default_atlas_cell")]
    pub card_width: u32,
    #[serde(default = "default_atlas_cell")]
    pub card_height: u32,
    #[serde(default = "default_atlas_columns")]
    pub columns: usize,
    #[serde(default = "default_atlas_rows")]
    pub rows: usize,
    #[serde(default = "default_atlas_background")]
    pub background: Color,
}

impl AtlasConfig {
    pub fn new(prefix: impl Into<String>, source: SourceSpec) -> Self {
        Self {
            prefix: prefix.into(),
            source,
            card_width: default_atlas_cell(),
            card_height: default_atlas_cell(),
            columns: default_atlas_columns(),
            rows: default_atlas_rows(),
            background: default_atlas_background(),
        }
    }
}
