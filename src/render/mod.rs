//! Compositing card images onto pages and encoding the results.

use deckpress_types::Color;
use image::RgbaImage;
use thiserror::Error;

pub mod pdf;
pub mod raster;

pub use pdf::LopdfDocumentRenderer;
pub use raster::{decode_png, encode_png, RasterCanvas};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Image encoding error: {0}")]
    Encode(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Encode(err.to_string())
    }
}

/// A drawing surface measured in whole pixels with the origin top-left.
pub trait Canvas {
    /// Paints the whole surface with `color`, discarding what was drawn before.
    fn fill(&mut self, color: Color);

    /// Alpha-composites `image` with its top-left corner at `(x, y)`. Parts
    /// outside the surface are clipped.
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64);
}

/// A multi-page document built from full-page rasters.
pub trait DocumentRenderer {
    /// Prepares the renderer for a new document.
    fn begin_document(&mut self) -> Result<(), RenderError>;

    /// Appends one page showing `page` full-bleed.
    fn render_page(&mut self, page: &RgbaImage) -> Result<(), RenderError>;

    /// Number of pages rendered so far.
    fn page_count(&self) -> usize;

    /// Finalizes the document and returns its encoded bytes.
    fn finalize(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
