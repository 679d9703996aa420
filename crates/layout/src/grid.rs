//! Print sheet grid sizing and per-card placement.

use crate::config::GridSpec;
use crate::LayoutError;
use deckpress_types::{CardPosition, Layout};

/// Number of cards of `card` pixels that fit in `available` pixels with `gap`
/// between neighbours, at least one.
fn fit_count(available: u32, card: u32, gap: u32) -> usize {
    let fitted = (u64::from(available) + u64::from(gap)) / (u64::from(card) + u64::from(gap));
    usize::try_from(fitted).unwrap_or(usize::MAX).max(1)
}

/// Offset that centers `used` pixels inside `available`, rounded half up and
/// never negative.
fn centered_offset(available: i64, used: i64) -> i64 {
    let slack = available - used;
    if slack <= 0 { 0 } else { (slack + 1) / 2 }
}

/// Length of `count` cards laid end to end with gaps between them.
fn span(count: usize, card: u32, gap: u32) -> i64 {
    let count = count as i64;
    count * i64::from(card) + (count - 1).max(0) * i64::from(gap)
}

/// Computes the largest grid of cards that fits on the page.
///
/// Explicit column/row overrides replace the derived counts; any count that
/// comes out as zero is clamped to one. Only a zero card dimension is an error.
pub fn compute_layout(spec: &GridSpec) -> Result<Layout, LayoutError> {
    if spec.card.width == 0 || spec.card.height == 0 {
        return Err(LayoutError::InvalidCardSize {
            width: spec.card.width,
            height: spec.card.height,
        });
    }

    let columns = spec
        .columns
        .unwrap_or_else(|| fit_count(spec.page.width, spec.card.width, spec.gap))
        .max(1);
    let rows = spec
        .rows
        .unwrap_or_else(|| fit_count(spec.page.height, spec.card.height, spec.gap))
        .max(1);

    let layout = Layout {
        page: spec.page,
        card_width: spec.card.width,
        card_height: spec.card.height,
        gap: spec.gap,
        columns,
        rows,
        cards_per_sheet: columns.saturating_mul(rows).max(1),
    };
    log::debug!(
        "Layout {}x{} cards of {}x{}px (gap {}px) on {}x{}px page.",
        layout.columns,
        layout.rows,
        layout.card_width,
        layout.card_height,
        layout.gap,
        layout.page.width,
        layout.page.height
    );
    Ok(layout)
}

/// Computes front and back positions for the first `batch_size` slots of a sheet.
///
/// The occupied block is centered vertically and every row is centered on its
/// own, so a short final row sits in the middle rather than at the left edge.
/// Back positions mirror the fronts horizontally for long-edge duplex printing.
///
/// `batch_size` must not exceed `layout.cards_per_sheet`.
pub fn compute_positions(batch_size: usize, layout: &Layout) -> Result<Vec<CardPosition>, LayoutError> {
    if batch_size > layout.cards_per_sheet {
        return Err(LayoutError::BatchExceedsSheet {
            batch: batch_size,
            capacity: layout.cards_per_sheet,
        });
    }

    let columns = layout.columns;
    let rows_needed = batch_size.div_ceil(columns).min(layout.rows);
    let block_height = span(rows_needed, layout.card_height, layout.gap);
    let start_y = centered_offset(i64::from(layout.page.height), block_height);
    let step_x = i64::from(layout.card_width) + i64::from(layout.gap);
    let step_y = i64::from(layout.card_height) + i64::from(layout.gap);

    let mut positions = Vec::with_capacity(batch_size);
    for row in 0..rows_needed {
        let cards_in_row = columns.min(batch_size - row * columns);
        let row_width = span(cards_in_row, layout.card_width, layout.gap);
        let row_start_x = centered_offset(i64::from(layout.page.width), row_width);
        let y = start_y + row as i64 * step_y;

        for col in 0..cards_in_row {
            let front_x = row_start_x + col as i64 * step_x;
            positions.push(CardPosition::mirrored(
                front_x,
                y,
                layout.page.width,
                layout.card_width,
            ));
        }
    }

    Ok(positions)
}
