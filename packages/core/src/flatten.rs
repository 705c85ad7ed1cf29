//! Flattening nested values into delimiter-joined keys, and back.
//!
//! `flatten` walks a `Value` tree and records every scalar leaf under its
//! delimiter-joined path; `rebuild` is the inverse, synthesizing a tree
//! from a flat mapping. Both are pure and run to completion on the
//! caller's thread.

use std::collections::BTreeMap;

use crate::{Error, Result, Value};

/// Join a key prefix with the next path segment.
pub(crate) fn join_key(prefix: &str, segment: &str, delimiter: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, delimiter, segment)
    }
}

/// Flatten `value` into `target` under `prefix`.
///
/// Map entries recurse with their key as the next segment; array elements
/// recurse with their decimal index. Scalars are stored directly at the
/// joined key. Empty containers contribute no keys, which is accepted,
/// not an error.
///
/// The resulting key set is independent of traversal order: each leaf's
/// key is a function of its path alone.
///
/// # Errors
///
/// `InvalidInput` when `value` itself is not a map or an array - a scalar
/// cannot be the root of a flattened store.
pub fn flatten(
    target: &mut BTreeMap<String, Value>,
    value: Value,
    prefix: &str,
    delimiter: &str,
) -> Result<()> {
    match value {
        Value::Map(map) => {
            for (sub_key, sub_value) in map {
                let new_key = join_key(prefix, &sub_key, delimiter);
                assign(target, sub_value, &new_key, delimiter)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                let new_key = join_key(prefix, &index.to_string(), delimiter);
                assign(target, item, &new_key, delimiter)?;
            }
            Ok(())
        }
        _ => Err(Error::invalid_input(
            "the root value must be a map or an array",
        )),
    }
}

/// Store a leaf at `key`, or recurse if the value is itself a container.
fn assign(
    target: &mut BTreeMap<String, Value>,
    value: Value,
    key: &str,
    delimiter: &str,
) -> Result<()> {
    if value.is_container() {
        flatten(target, value, key, delimiter)
    } else {
        target.insert(key.to_string(), value);
        Ok(())
    }
}

/// Rebuild the nested value a flat mapping describes.
///
/// Each key is split on the delimiter and walked top-down. The container
/// kind at every level follows the next segment: a segment that parses as
/// a non-negative integer selects an array, anything else a map. Arrays
/// grow to exactly `index + 1` slots; slots no key ever fills stay
/// `Null`. An empty mapping rebuilds to `Null`.
///
/// Mixed numeric and string siblings at one level are unsupported: the
/// first key to arrive decides the container kind for that level.
pub fn rebuild(flat: &BTreeMap<String, Value>, delimiter: &str) -> Value {
    let mut root = Value::Null;

    for (key, value) in flat {
        let segments: Vec<&str> = key.split(delimiter).collect();
        insert_segments(&mut root, &segments, value.clone());
    }

    root
}

fn insert_segments(node: &mut Value, segments: &[&str], value: Value) {
    let segment = segments[0];
    let index = segment.parse::<usize>().ok();

    // A fresh slot takes its shape from the first segment that lands on it.
    if node.is_null() {
        *node = match index {
            Some(_) => Value::array(),
            None => Value::map(),
        };
    }

    match node {
        Value::Array(items) => {
            // Mixed siblings are unsupported; a non-index segment on an
            // array level lands at slot 0.
            let index = index.unwrap_or(0);
            if items.len() < index + 1 {
                items.resize(index + 1, Value::Null);
            }
            if segments.len() == 1 {
                items[index] = value;
            } else {
                insert_segments(&mut items[index], &segments[1..], value);
            }
        }
        Value::Map(map) => {
            let slot = map.entry(segment.to_string()).or_insert(Value::Null);
            if segments.len() == 1 {
                *slot = value;
            } else {
                insert_segments(slot, &segments[1..], value);
            }
        }
        _ => {
            // A scalar already occupies this position; the longer key wins
            // and replaces it with the container it implies.
            *node = Value::Null;
            insert_segments(node, segments, value);
        }
    }
}
