//! The flat store - an addressable container of delimiter-keyed leaves.

use std::collections::BTreeMap;

use crate::flatten::{flatten, join_key, rebuild};
use crate::{KeyIndex, Result, Value};

/// A flat key-value view of a nested structure.
///
/// Keys are the delimiter-joined paths of every scalar leaf; the key
/// index tracks every prefix so subtree lookups never scan the
/// container. The namespace, when set, decorates exported keys only and
/// never touches internal storage.
///
/// A `FlatStore` is not safe for simultaneous use from multiple threads
/// without external locking: every operation is synchronous and mutates
/// in place. This is a deliberate simplicity trade-off for a structure
/// that lives on one thread.
///
/// # Example
///
/// ```rust
/// use dotkey_core::{Entry, FlatStore, Value};
///
/// let mut store = FlatStore::new();
/// store.add("server.host", "localhost");
/// store.add("server.port", 8080);
///
/// assert_eq!(
///     store.get("server.port"),
///     Some(Entry::Leaf(Value::Integer(8080)))
/// );
/// assert!(store.get("server").unwrap().is_branch());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FlatStore {
    delimiter: String,
    namespace: String,
    container: BTreeMap<String, Value>,
    index: KeyIndex,
}

/// The result of a [`FlatStore::get`]: a scalar leaf or an owned sub-store.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// The key addressed exactly one stored scalar.
    Leaf(Value),
    /// The key is a prefix shared by further keys; an independent,
    /// re-indexed copy of that subtree.
    Branch(FlatStore),
}

impl Entry {
    /// Check if this entry is a scalar leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }

    /// Check if this entry is a subtree.
    pub fn is_branch(&self) -> bool {
        matches!(self, Entry::Branch(_))
    }

    /// Get the leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Entry::Leaf(value) => Some(value),
            Entry::Branch(_) => None,
        }
    }

    /// Get the sub-store, if this is a branch.
    pub fn as_branch(&self) -> Option<&FlatStore> {
        match self {
            Entry::Branch(store) => Some(store),
            Entry::Leaf(_) => None,
        }
    }

    /// Consume the entry into its sub-store, if this is a branch.
    pub fn into_branch(self) -> Option<FlatStore> {
        match self {
            Entry::Branch(store) => Some(store),
            Entry::Leaf(_) => None,
        }
    }
}

impl FlatStore {
    /// Create an empty store with the `"."` delimiter and no namespace.
    pub fn new() -> Self {
        Self {
            delimiter: ".".to_string(),
            namespace: String::new(),
            container: BTreeMap::new(),
            index: KeyIndex::new(),
        }
    }

    /// Build a store by flattening `value` with the default delimiter.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the root is not a map or an array.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_value_with_delimiter(value, ".")
    }

    /// Build a store by flattening `value` with a caller-chosen delimiter.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the root is not a map or an array.
    pub fn from_value_with_delimiter(value: Value, delimiter: &str) -> Result<Self> {
        let mut store = FlatStore::new().with_delimiter(delimiter);
        flatten(&mut store.container, value, "", delimiter)?;

        for key in store.container.keys() {
            store.index.insert(key, delimiter);
        }

        Ok(store)
    }

    /// The delimiter joining and splitting key segments.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Change the delimiter for subsequent operations.
    ///
    /// Already-stored entries are not re-keyed.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }

    /// Builder form of [`set_delimiter`](FlatStore::set_delimiter).
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.set_delimiter(delimiter);
        self
    }

    /// The namespace prefix applied to exported keys, empty if unset.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Set the namespace prefix.
    ///
    /// The namespace decorates [`all`](FlatStore::all) and
    /// [`to_nested`](FlatStore::to_nested) output when asked for; it
    /// never affects internal keys or the index.
    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = namespace.into();
    }

    /// Builder form of [`set_namespace`](FlatStore::set_namespace).
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.set_namespace(namespace);
        self
    }

    /// Insert `value` at `key`.
    ///
    /// A container value is flattened under `key` and its leaf entries
    /// merged in; a scalar is stored directly. A key that previously held
    /// a leaf is promoted when a subtree arrives at or beneath it: the old
    /// leaf is deleted before the new entries land. The index is updated
    /// for every inserted key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        if value.is_container() {
            // Promotion: a leaf at this exact key cannot coexist with the
            // subtree about to be inserted under it. An empty container
            // still promotes, even though it contributes no keys.
            if self.is_sole_leaf(&key) {
                self.delete(&key);
            }

            let mut leaves = BTreeMap::new();
            // The value is a container, so flatten cannot reject it.
            let _ = flatten(&mut leaves, value, &key, &self.delimiter);

            for (sub_key, leaf) in leaves {
                self.insert_leaf(sub_key, leaf);
            }
        } else {
            self.insert_leaf(key, value);
        }
    }

    /// Store one flat leaf, promoting on the way: a stored leaf at a
    /// proper prefix of `key` is deleted first, since the arriving key
    /// turns that position into a subtree.
    fn insert_leaf(&mut self, key: String, value: Value) {
        let segments: Vec<&str> = key.split(self.delimiter.as_str()).collect();
        for end in 1..segments.len() {
            let prefix = segments[..end].join(self.delimiter.as_str());
            if self.is_sole_leaf(&prefix) {
                self.delete(&prefix);
            }
        }

        self.index.insert(&key, &self.delimiter);
        self.container.insert(key, value);
    }

    /// Check whether `key` holds a stored leaf with nothing beneath it.
    fn is_sole_leaf(&self, key: &str) -> bool {
        self.index
            .get(key)
            .is_some_and(|keys| keys.len() == 1 && keys[0] == key)
    }

    /// Look up `key`.
    ///
    /// Returns `None` when nothing lives at or under `key`. A single
    /// exact hit returns the scalar leaf; anything else denotes a
    /// subtree, returned as a fresh sub-store with `key + delimiter`
    /// stripped from every contained key and each entry re-indexed. The
    /// sub-store is an independent copy carrying the same delimiter and
    /// no namespace: mutating it never affects this store.
    pub fn get(&self, key: &str) -> Option<Entry> {
        let keys = self.index.get(key)?;

        if keys.len() == 1 && keys[0] == key {
            if let Some(value) = self.container.get(key) {
                return Some(Entry::Leaf(value.clone()));
            }
        }

        let prefix = format!("{}{}", key, self.delimiter);
        let mut branch = FlatStore::new().with_delimiter(self.delimiter.clone());

        for full_key in keys {
            // A leaf shadowed by its own subtree has no place in the
            // branch view.
            if let Some(stripped) = full_key.strip_prefix(&prefix) {
                if let Some(value) = self.container.get(full_key) {
                    branch.add(stripped, value.clone());
                }
            }
        }

        Some(Entry::Branch(branch))
    }

    /// Remove the exact key `key` and its index entries.
    ///
    /// A branch prefix that is not itself a stored key is left
    /// untouched: deleting a whole subtree means deleting each of its
    /// leaves.
    pub fn delete(&mut self, key: &str) {
        if self.container.remove(key).is_some() {
            self.index.remove(key, &self.delimiter);
        }
    }

    /// Snapshot of every flat key and its value.
    ///
    /// With `with_namespace` set and a non-empty namespace configured,
    /// every key is rendered as `namespace + delimiter + key`.
    pub fn all(&self, with_namespace: bool) -> BTreeMap<String, Value> {
        let mut result = BTreeMap::new();

        for (key, value) in &self.container {
            let key = if with_namespace && !self.namespace.is_empty() {
                join_key(&self.namespace, key, &self.delimiter)
            } else {
                key.clone()
            };
            result.insert(key, value.clone());
        }

        result
    }

    /// Rebuild the nested value this store flattens.
    pub fn to_nested(&self, with_namespace: bool) -> Value {
        rebuild(&self.all(with_namespace), &self.delimiter)
    }

    /// Number of stored leaves.
    pub fn len(&self) -> usize {
        self.container.len()
    }

    /// True if no leaves are stored.
    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Check whether `key` holds a stored leaf (exact match only).
    pub fn contains_key(&self, key: &str) -> bool {
        self.container.contains_key(key)
    }

    /// Iterate over the stored flat keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.container.keys().map(String::as_str)
    }

    /// Read-only view of the key index.
    pub fn index(&self) -> &KeyIndex {
        &self.index
    }
}

impl Default for FlatStore {
    fn default() -> Self {
        Self::new()
    }
}
