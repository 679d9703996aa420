use serde::{Deserialize, Serialize};

/// How the back face of a card is found from its front face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BackStrategy {
    /// The back is the front's file name with `prefix` applied, looked up in
    /// `dir` (or the front's own directory).
    #[serde(rename_all = "camelCase")]
    PairedPrefix {
        prefix: String,
        #[serde(default)]
        dir: Option<String>,
    },
    /// Every card in the group shares one back image.
    StaticImage { path: String },
}

/// A resolved front/back resource pair for one card slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPair {
    pub front: String,
    pub back: String,
    pub is_filler: bool,
}

impl CardPair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self { front: front.into(), back: back.into(), is_filler: false }
    }
}

/// The blank card used to pad print batches. Both paths have already been
/// checked to exist when a value of this type is built by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillerCard {
    pub front: String,
    pub back: String,
}

impl FillerCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self { front: front.into(), back: back.into() }
    }

    /// A fresh filler pair.
    pub fn card(&self) -> CardPair {
        CardPair { front: self.front.clone(), back: self.back.clone(), is_filler: true }
    }
}
