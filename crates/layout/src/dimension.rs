//! Conversion of declared card and page sizes into print pixels.

use deckpress_types::{Axis, PageSize, PixelSize, MM_PER_INCH};

/// Converts millimeters to pixels at `dpi`, rounding half up.
pub fn mm_to_pixels(mm: f64, dpi: u32) -> u32 {
    let px = mm / MM_PER_INCH * f64::from(dpi);
    // Inputs are non-negative, so round() (half away from zero) is half-up here.
    px.max(0.0).round() as u32
}

pub fn page_pixels(page: &PageSize, dpi: u32) -> PixelSize {
    PixelSize::new(mm_to_pixels(page.width_mm, dpi), mm_to_pixels(page.height_mm, dpi))
}

/// Everything a card group declares about its printed size.
///
/// Per axis the millimeter size wins, then the explicit pixel size, then the
/// base pixel size the card images were rendered at. Zero values count as
/// undeclared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardDimensions {
    pub base: PixelSize,
    pub print_width_mm: Option<f64>,
    pub print_height_mm: Option<f64>,
    pub print_width_px: Option<u32>,
    pub print_height_px: Option<u32>,
}

impl CardDimensions {
    pub fn from_base(base: PixelSize) -> Self {
        Self { base, ..Default::default() }
    }

    pub fn resolve(&self, axis: Axis, dpi: u32) -> u32 {
        let (mm, px) = match axis {
            Axis::Width => (self.print_width_mm, self.print_width_px),
            Axis::Height => (self.print_height_mm, self.print_height_px),
        };
        if let Some(mm) = mm.filter(|mm| *mm > 0.0) {
            return mm_to_pixels(mm, dpi);
        }
        if let Some(px) = px.filter(|px| *px > 0) {
            return px;
        }
        self.base.along(axis)
    }

    pub fn resolve_size(&self, dpi: u32) -> PixelSize {
        PixelSize::new(self.resolve(Axis::Width, dpi), self.resolve(Axis::Height, dpi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckpress_types::DEFAULT_DPI;

    #[test]
    fn test_a4_page_pixels() {
        assert_eq!(page_pixels(&PageSize::A4, DEFAULT_DPI), PixelSize::new(2480, 3508));
    }

    #[test]
    fn test_mm_conversion_known_cards() {
        assert_eq!(mm_to_pixels(85.0, DEFAULT_DPI), 1004);
        assert_eq!(mm_to_pixels(78.0, DEFAULT_DPI), 921);
        assert_eq!(mm_to_pixels(2.0, DEFAULT_DPI), 24);
    }

    #[test]
    fn test_mm_conversion_rounds_half_up() {
        // Half an inch is exact in binary floating point.
        assert_eq!(mm_to_pixels(12.7, 1), 1);
        assert_eq!(mm_to_pixels(12.7, 5), 3);
        assert_eq!(mm_to_pixels(12.7, 3), 2);
    }

    #[test]
    fn test_millimeters_take_precedence() {
        let dims = CardDimensions {
            base: PixelSize::new(490, 490),
            print_width_mm: Some(85.0),
            print_width_px: Some(700),
            print_height_px: Some(720),
            ..Default::default()
        };
        assert_eq!(dims.resolve(Axis::Width, DEFAULT_DPI), 1004);
        assert_eq!(dims.resolve(Axis::Height, DEFAULT_DPI), 720);
    }

    #[test]
    fn test_falls_back_to_base_size() {
        let dims = CardDimensions {
            base: PixelSize::new(600, 840),
            print_width_mm: Some(0.0),
            print_height_px: Some(0),
            ..Default::default()
        };
        assert_eq!(dims.resolve_size(DEFAULT_DPI), PixelSize::new(600, 840));
    }
}
