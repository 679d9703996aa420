//! Fixed-grid atlas packing.
//!
//! Items fill pages of `columns * rows` cells in input order, left to right,
//! top to bottom, with no spacing between cells.

use crate::LayoutError;
use deckpress_types::{AtlasPageName, PixelSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasGrid {
    pub columns: usize,
    pub rows: usize,
    pub cell: PixelSize,
}

impl AtlasGrid {
    pub fn new(columns: usize, rows: usize, cell: PixelSize) -> Result<Self, LayoutError> {
        if columns == 0 || rows == 0 {
            return Err(LayoutError::InvalidGrid { columns, rows });
        }
        if cell.width == 0 || cell.height == 0 {
            return Err(LayoutError::InvalidCardSize { width: cell.width, height: cell.height });
        }
        Ok(Self { columns, rows, cell })
    }

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Pixel size of a full atlas page.
    pub fn canvas_size(&self) -> PixelSize {
        PixelSize::new(
            self.cell.width * self.columns as u32,
            self.cell.height * self.rows as u32,
        )
    }
}

/// One item's placement on an atlas page.
#[derive(Debug, PartialEq, Eq)]
pub struct AtlasCell<'a, T> {
    pub item: &'a T,
    pub column: usize,
    pub row: usize,
    pub x: u32,
    pub y: u32,
}

// Manual impls: the cell only borrows `T`, so it is Copy regardless of `T`.
impl<T> Clone for AtlasCell<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AtlasCell<'_, T> {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasPage<'a, T> {
    /// 1-based.
    pub index: usize,
    pub name: AtlasPageName,
    pub cells: Vec<AtlasCell<'a, T>>,
}

impl<T> AtlasPage<'_, T> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Splits `items` into atlas pages.
///
/// An empty input produces no pages at all; callers decide how to report that.
pub fn pack<'a, T>(items: &'a [T], grid: &AtlasGrid, prefix: &str, locale: &str) -> Vec<AtlasPage<'a, T>> {
    items
        .chunks(grid.capacity())
        .enumerate()
        .map(|(page, batch)| {
            let cells = batch
                .iter()
                .enumerate()
                .map(|(k, item)| {
                    let column = k % grid.columns;
                    let row = k / grid.columns;
                    AtlasCell {
                        item,
                        column,
                        row,
                        x: column as u32 * grid.cell.width,
                        y: row as u32 * grid.cell.height,
                    }
                })
                .collect::<Vec<_>>();
            AtlasPage {
                index: page + 1,
                name: AtlasPageName::new(prefix, page + 1, cells.len(), locale),
                cells,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> AtlasGrid {
        AtlasGrid::new(10, 7, PixelSize::new(490, 490)).unwrap()
    }

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("card-{}.png", i)).collect()
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(grid().canvas_size(), PixelSize::new(4900, 3430));
        assert_eq!(grid().capacity(), 70);
    }

    #[test]
    fn test_empty_input_yields_no_pages() {
        let items: Vec<String> = Vec::new();
        assert!(pack(&items, &grid(), "milestone-faces", "en").is_empty());
    }

    #[test]
    fn test_partial_single_page() {
        let items = names(23);
        let pages = pack(&items, &grid(), "milestone-faces", "EN");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 23);
        assert_eq!(pages[0].name.as_str(), "milestone-faces-01-count-23-en");

        let last = pages[0].cells[22];
        assert_eq!((last.column, last.row), (2, 2));
        assert_eq!((last.x, last.y), (980, 980));
    }

    #[test]
    fn test_page_capacity_and_assignment() {
        let items = names(150);
        let pages = pack(&items, &grid(), "milestone-backs", "nl");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 70);
        assert_eq!(pages[1].len(), 70);
        assert_eq!(pages[2].len(), 10);
        assert_eq!(pages[2].name.file_name(), "milestone-backs-03-count-10-nl.png");

        for (k, item) in items.iter().enumerate() {
            let page = &pages[k / 70];
            let cell = page.cells[k % 70];
            assert_eq!(cell.item, item);
            assert_eq!(cell.column, (k % 70) % 10);
            assert_eq!(cell.row, (k % 70) / 10);
        }
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        assert_eq!(
            AtlasGrid::new(0, 7, PixelSize::new(490, 490)),
            Err(LayoutError::InvalidGrid { columns: 0, rows: 7 })
        );
        assert!(AtlasGrid::new(10, 7, PixelSize::new(490, 0)).is_err());
    }
}
