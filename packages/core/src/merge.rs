//! Combining stores with last-writer-wins semantics.

use crate::FlatStore;

/// Merge stores left to right into one.
///
/// The running result absorbs each subsequent store's namespaced export
/// through [`FlatStore::add`], so the same flat key in a later store
/// overwrites the earlier value, and a leaf overtaken by a later subtree
/// is promoted. The reverse - a subtree followed by a leaf at the same
/// key - overwrites the exact key and leaves the earlier sibling
/// sub-keys in place; insertion order is the precedence rule.
///
/// Merging is therefore NOT commutative: the input order decides the
/// outcome. A single store is returned unchanged; no stores yield an
/// empty store.
pub fn merge<I>(stores: I) -> FlatStore
where
    I: IntoIterator<Item = FlatStore>,
{
    let mut stores = stores.into_iter();
    let mut result = match stores.next() {
        Some(first) => first,
        None => return FlatStore::new(),
    };

    for store in stores {
        for (key, value) in store.all(true) {
            result.add(key, value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entry, Value};
    use collection_literals::btree;

    fn store_with(key: &str, value: &str) -> FlatStore {
        let mut store = FlatStore::new();
        store.add(key, value);
        store
    }

    #[test]
    fn later_store_wins() {
        let a = store_with("root.1.test", "aaa");
        let b = store_with("root.1.test", "111");

        let merged = merge([a, b]);

        assert_eq!(
            merged.get("root.1.test"),
            Some(Entry::Leaf(Value::from("111")))
        );
    }

    #[test]
    fn merge_is_order_sensitive() {
        let a = store_with("root.1.test", "aaa");
        let b = store_with("root.1.test", "111");

        let merged = merge([b, a]);

        assert_eq!(
            merged.get("root.1.test"),
            Some(Entry::Leaf(Value::from("aaa")))
        );
    }

    #[test]
    fn disjoint_keys_accumulate() {
        let mut a = FlatStore::new();
        a.add("root.1.test", "aaa");
        a.add("root.2.test", "bbb");

        let mut b = FlatStore::new();
        b.add("root.3.test", "ccc");

        let merged = merge([a, b]);

        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.get("root.3.test"),
            Some(Entry::Leaf(Value::from("ccc")))
        );
    }

    #[test]
    fn leaf_overtaken_by_subtree_is_promoted() {
        let a = FlatStore::from_value(Value::Map(btree! {
            "root.0.test".into() => Value::from("aaa"),
        }))
        .unwrap();
        let b = FlatStore::from_value(Value::Map(btree! {
            "root.0.test".into() => Value::Map(btree! {
                "abc".into() => Value::from("100"),
            }),
        }))
        .unwrap();

        let merged = merge([a, b]);

        assert!(!merged.contains_key("root.0.test"));
        assert_eq!(
            merged.get("root.0.test.abc"),
            Some(Entry::Leaf(Value::from("100")))
        );
    }

    #[test]
    fn subtree_overtaken_by_leaf_keeps_siblings() {
        // The defined precedence rule: the exact key is overwritten, the
        // earlier sub-keys survive.
        let a = FlatStore::from_value(Value::Map(btree! {
            "root.0.test".into() => Value::Map(btree! {
                "abc".into() => Value::from("100"),
            }),
        }))
        .unwrap();
        let b = FlatStore::from_value(Value::Map(btree! {
            "root.0.test".into() => Value::from("aaa"),
        }))
        .unwrap();

        let merged = merge([a, b]);

        assert!(merged.contains_key("root.0.test"));
        assert_eq!(
            merged.get("root.0.test.abc"),
            Some(Entry::Leaf(Value::from("100")))
        );
    }

    #[test]
    fn single_store_is_returned_unchanged() {
        let a = store_with("k", "v");
        let merged = merge([a.clone()]);
        assert_eq!(merged, a);
    }

    #[test]
    fn no_stores_yield_an_empty_store() {
        let merged = merge(Vec::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn namespaced_source_keys_carry_their_prefix() {
        let a = store_with("base", "1");
        let b = store_with("test", "a").with_namespace("ns");

        let merged = merge([a, b]);

        assert_eq!(merged.get("ns.test"), Some(Entry::Leaf(Value::from("a"))));
        assert_eq!(merged.get("test"), None);
    }
}
