use deckpress_types::PixelSize;

/// Inputs to [`compute_layout`](crate::compute_layout) for one card group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Page canvas in pixels.
    pub page: PixelSize,
    /// Printed card size in pixels, as produced by the dimension resolver.
    pub card: PixelSize,
    /// Spacing between adjacent cards, both horizontally and vertically.
    pub gap: u32,
    /// Fixed column count; derived from the page width when `None`.
    pub columns: Option<usize>,
    /// Fixed row count; derived from the page height when `None`.
    pub rows: Option<usize>,
}

impl GridSpec {
    pub fn new(page: PixelSize, card: PixelSize, gap: u32) -> Self {
        Self { page, card, gap, columns: None, rows: None }
    }

    pub fn with_columns(mut self, columns: Option<usize>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: Option<usize>) -> Self {
        self.rows = rows;
        self
    }
}
