//! Field identity derived from label text.
//!
//! An id is the slugged label plus a random suffix, so relabeling a field
//! always yields a fresh id even when two fields share a caption.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Stable identifier of a field within a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from `label` using `ids` for the uniqueness suffix.
    pub fn from_label(label: &str, ids: &dyn IdGenerator) -> Self {
        Self(format!("{}-{}", slug(label), ids.suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Lower-case `label` and replace every whitespace run with a hyphen.
pub fn slug(label: &str) -> String {
    WHITESPACE.replace_all(&label.to_lowercase(), "-").into_owned()
}

/// Source of the uniqueness suffix appended to slugged labels.
pub trait IdGenerator: Send + Sync {
    fn suffix(&self) -> String;
}

/// Nine random base-36 characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl IdGenerator for RandomSuffix {
    fn suffix(&self) -> String {
        let mut rng = rand::rng();
        (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect()
    }
}

/// Zero-padded counter, for reproducible ids in tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialSuffix {
    next: AtomicUsize,
}

impl SequentialSuffix {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialSuffix {
    fn suffix(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{n:0width$}", width = SUFFIX_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slug("Full Name"), "full-name");
        assert_eq!(slug("Date  of\tBirth"), "date-of-birth");
        assert_eq!(slug(" Padded "), "-padded-");
        assert_eq!(slug(""), "");
    }

    #[test]
    fn random_suffix_shape() {
        let suffix = RandomSuffix.suffix();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn from_label_appends_suffix() {
        let ids = SequentialSuffix::new();
        assert_eq!(
            FieldId::from_label("Full Name", &ids).as_str(),
            "full-name-000000000"
        );
        assert_eq!(
            FieldId::from_label("Full Name", &ids).as_str(),
            "full-name-000000001"
        );
    }

    #[test]
    fn same_label_twice_yields_distinct_random_ids() {
        let a = FieldId::from_label("Email", &RandomSuffix);
        let b = FieldId::from_label("Email", &RandomSuffix);
        assert!(a.as_str().starts_with("email-"));
        assert_ne!(a, b);
    }
}
