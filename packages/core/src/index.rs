//! The key index - every key prefix mapped to the full keys beneath it.
//!
//! This is what turns "find all keys under prefix X" from a scan of the
//! whole container into a single lookup plus O(matches) retrieval. The
//! index is maintained incrementally: every container insert and delete
//! updates it in the same call.

use std::collections::BTreeMap;

/// Derived mapping from every key prefix (including the full key) to the
/// list of full keys sharing it.
///
/// Invariants, upheld by [`insert`](KeyIndex::insert) and
/// [`remove`](KeyIndex::remove):
/// - every prefix of an indexed key is present and lists that key
/// - no prefix entry outlives its last key; drained entries are removed
///   outright, never left as empty sentinels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl KeyIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` under every one of its prefixes.
    ///
    /// Re-inserting a known key is a no-op; duplicates are never added.
    pub fn insert(&mut self, key: &str, delimiter: &str) {
        for prefix in prefixes(key, delimiter) {
            let keys = self.entries.entry(prefix).or_default();
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    /// Drop `key` from every one of its prefixes.
    ///
    /// Prefix entries whose list drains are removed entirely.
    pub fn remove(&mut self, key: &str, delimiter: &str) {
        for prefix in prefixes(key, delimiter) {
            if let Some(keys) = self.entries.get_mut(&prefix) {
                keys.retain(|k| k != key);
                if keys.is_empty() {
                    self.entries.remove(&prefix);
                }
            }
        }
    }

    /// Full keys stored under `prefix`, if any.
    pub fn get(&self, prefix: &str) -> Option<&[String]> {
        self.entries.get(prefix).map(|keys| keys.as_slice())
    }

    /// Check whether any key lives at or under `prefix`.
    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Number of distinct prefixes currently indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(prefix, keys)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(prefix, keys)| (prefix.as_str(), keys.as_slice()))
    }
}

/// Every delimiter-joined truncation of `key`, shortest first, the full
/// key last.
fn prefixes(key: &str, delimiter: &str) -> Vec<String> {
    let segments: Vec<&str> = key.split(delimiter).collect();
    (1..=segments.len())
        .map(|end| segments[..end].join(delimiter))
        .collect()
}
