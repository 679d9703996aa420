//! Listing and ordering of source card images.

use deckpress_traits::{ResourceError, ResourceProvider};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

fn default_extension() -> String {
    "png".to_string()
}

/// Which files in a directory are card images for a group or atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpec {
    pub dir: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub include_prefix: Option<String>,
    #[serde(default)]
    pub exclude_prefix: Option<String>,
}

impl SourceSpec {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: default_extension(),
            include_prefix: None,
            exclude_prefix: None,
        }
    }

    pub fn with_include_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.include_prefix = Some(prefix.into());
        self
    }

    pub fn with_exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefix = Some(prefix.into());
        self
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let suffix = format!(".{}", self.extension.to_ascii_lowercase());
        if !file_name.to_ascii_lowercase().ends_with(&suffix) {
            return false;
        }
        if let Some(prefix) = &self.include_prefix
            && !file_name.starts_with(prefix.as_str())
        {
            return false;
        }
        if let Some(prefix) = &self.exclude_prefix
            && file_name.starts_with(prefix.as_str())
        {
            return false;
        }
        true
    }
}

/// Lists the matching images under `spec.dir` as full resource paths in
/// natural order.
pub fn list_sources(provider: &dyn ResourceProvider, spec: &SourceSpec) -> Result<Vec<String>, ResourceError> {
    let mut names: Vec<String> = provider
        .list(&spec.dir)?
        .into_iter()
        .filter(|name| spec.matches(name))
        .collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names.iter().map(|name| join_path(&spec.dir, name)).collect())
}

/// Case-insensitive comparison that orders digit runs by numeric value, so
/// `card-2` sorts before `card-10`. Falls back to byte order on ties.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ord = compare_digit_runs(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Joins a slash-separated resource directory and a file name.
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Splits a resource path into its directory and file name.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", path),
    }
}
