//! Newtype wrappers for generated output identifiers.
//!
//! Downstream tooling parses these names, so their formatting is fixed here
//! rather than at every call site.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Identifier of one printed front/back sheet pair: `{NNN}-{groupKey}`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SheetId(Arc<str>);

impl SheetId {
    /// `sequence` is the run-wide, 1-based sheet counter.
    pub fn new(sequence: usize, group_key: &str) -> Self {
        Self(format!("{:03}-{}", sequence, group_key).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn front_file_name(&self) -> String {
        format!("{}-front.png", self.0)
    }

    pub fn back_file_name(&self) -> String {
        format!("{}-back.png", self.0)
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SheetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Name of one packed atlas page: `{prefix}-{NN}-count-{K}-{locale}`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AtlasPageName(Arc<str>);

impl AtlasPageName {
    /// `page_index` is 1-based. The locale is lowercased.
    pub fn new(prefix: &str, page_index: usize, item_count: usize, locale: &str) -> Self {
        Self(
            format!(
                "{}-{:02}-count-{}-{}",
                prefix,
                page_index,
                item_count,
                locale.to_lowercase()
            )
            .into(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for AtlasPageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AtlasPageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
