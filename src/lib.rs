//! Print-sheet and texture-atlas compiler for rendered card decks.
//!
//! Card faces already exist as images; this crate arranges them. Atlases pack
//! card faces into fixed grids for digital play. Print sheets place fronts and
//! their mirrored backs on double-sided pages and bundle them into one PDF.

pub mod back;
pub mod cache;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod source;

pub use back::{resolve_filler, BackResolver};
pub use cache::{CardImage, ImageCache};
pub use config::{AtlasConfig, CardGroupConfig, RunConfig};
pub use error::PipelineError;
pub use pipeline::{DeckPipeline, PipelineBuilder, RunSummary, RunTarget};
pub use source::SourceSpec;

pub use deckpress_layout as layout;
pub use deckpress_resource as resource;
pub use deckpress_traits as traits;
pub use deckpress_types as types;
