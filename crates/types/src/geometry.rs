use serde::{Deserialize, Serialize};

/// Print resolution used for every millimeter conversion.
pub const DEFAULT_DPI: u32 = 300;
pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

/// Integer pixel dimensions of a canvas, card cell or source image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

/// Physical page size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize { width_mm: 210.0, height_mm: 297.0 };

    /// Page size in PDF points (1/72 inch), unrounded.
    pub fn to_points(&self) -> (f64, f64) {
        (
            self.width_mm / MM_PER_INCH * POINTS_PER_INCH,
            self.height_mm / MM_PER_INCH * POINTS_PER_INCH,
        )
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Grid geometry for one card group on one page size.
///
/// `columns >= 1`, `rows >= 1` and `cards_per_sheet == columns * rows`
/// hold for every value produced by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub page: PixelSize,
    pub card_width: u32,
    pub card_height: u32,
    pub gap: u32,
    pub columns: usize,
    pub rows: usize,
    pub cards_per_sheet: usize,
}

impl Layout {
    pub fn card_size(&self) -> PixelSize {
        PixelSize::new(self.card_width, self.card_height)
    }
}

/// Where one card slot lands on the front page and on the mirrored back page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPosition {
    pub front_x: i64,
    pub front_y: i64,
    pub back_x: i64,
    pub back_y: i64,
}

impl CardPosition {
    /// Builds a position whose back slot mirrors the front across the page's vertical axis.
    pub fn mirrored(front_x: i64, front_y: i64, page_width: u32, card_width: u32) -> Self {
        Self {
            front_x,
            front_y,
            back_x: i64::from(page_width) - front_x - i64::from(card_width),
            back_y: front_y,
        }
    }
}
