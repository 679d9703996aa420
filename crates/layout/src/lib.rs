//! Deterministic layout and packing for card print sheets and texture atlases.
//!
//! Nothing in this crate touches the filesystem or pixels: it turns sizes and
//! counts into grids, coordinates and batches.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Card size must be positive, got {width}x{height}px.")]
    InvalidCardSize { width: u32, height: u32 },
    #[error("Grid must have at least one column and one row, got {columns}x{rows}.")]
    InvalidGrid { columns: usize, rows: usize },
    #[error("Batch of {batch} cards does not fit a sheet of {capacity}.")]
    BatchExceedsSheet { batch: usize, capacity: usize },
}

pub mod atlas;
pub mod config;
pub mod dimension;
pub mod grid;
pub mod padding;

pub use self::atlas::{pack, AtlasCell, AtlasGrid, AtlasPage};
pub use self::config::GridSpec;
pub use self::dimension::{mm_to_pixels, page_pixels, CardDimensions};
pub use self::grid::{compute_layout, compute_positions};
pub use self::padding::{filler_sheet, pad, plan_batches};
