//! Splitting a group's cards into print batches and topping them up with
//! blank filler cards.

use deckpress_types::{CardPair, FillerCard};

/// Pads `batch` with filler pairs until it holds `target` cards.
///
/// Without a filler the batch is returned as is, short or not.
pub fn pad(mut batch: Vec<CardPair>, target: usize, filler: Option<&FillerCard>) -> Vec<CardPair> {
    if let Some(filler) = filler {
        while batch.len() < target {
            batch.push(filler.card());
        }
    }
    batch
}

/// A batch consisting only of filler cards.
pub fn filler_sheet(target: usize, filler: &FillerCard) -> Vec<CardPair> {
    (0..target).map(|_| filler.card()).collect()
}

/// Chunks `cards` into sheets of `cards_per_sheet`, pads each sheet and appends
/// `extra_filler_sheets` all-filler sheets when a filler is available.
///
/// No cards means no sheets, extra filler sheets included.
pub fn plan_batches(
    cards: Vec<CardPair>,
    cards_per_sheet: usize,
    filler: Option<&FillerCard>,
    extra_filler_sheets: usize,
) -> Vec<Vec<CardPair>> {
    if cards.is_empty() {
        return Vec::new();
    }
    let cards_per_sheet = cards_per_sheet.max(1);

    let mut batches: Vec<Vec<CardPair>> = cards
        .chunks(cards_per_sheet)
        .map(|chunk| pad(chunk.to_vec(), cards_per_sheet, filler))
        .collect();

    if let Some(filler) = filler {
        batches.extend((0..extra_filler_sheets).map(|_| filler_sheet(cards_per_sheet, filler)));
    }
    batches
}
