use super::{Canvas, RenderError};
use deckpress_types::{Color, PixelSize};
use image::{imageops, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// An in-memory RGBA page, fully transparent until filled.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    pixels: RgbaImage,
}

impl RasterCanvas {
    pub fn new(size: PixelSize) -> Self {
        Self {
            pixels: RgbaImage::new(size.width, size.height),
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl Canvas for RasterCanvas {
    fn fill(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba());
        for p in self.pixels.pixels_mut() {
            *p = pixel;
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, image, x, y);
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}
