//! End-to-end exercises of the decode -> store -> encode pipeline.

use collection_literals::btree;
use dotkey_core::{merge, Entry, FlatStore, Value};
use dotkey_json::{from_json, to_json};

const CORPUS: &str = r#"{
    "test": "a",
    "test01": {
        "a": {
            "avt": "hi"
        }
    },
    "abc": [
        { "qw": 1 },
        { "qw": 2 },
        { "qw": 3 }
    ],
    "dca": [
        [1, 2, 3],
        [4, 5, 6]
    ]
}"#;

#[test]
fn decode_then_lookup() {
    let store = from_json(CORPUS).unwrap();

    assert_eq!(store.get("test"), Some(Entry::Leaf(Value::from("a"))));
    assert_eq!(store.get("abc.2.qw"), Some(Entry::Leaf(Value::Integer(3))));
    assert_eq!(store.get("dca.1.0"), Some(Entry::Leaf(Value::Integer(4))));

    let branch = store.get("test01.a").unwrap().into_branch().unwrap();
    assert_eq!(branch.get("avt"), Some(Entry::Leaf(Value::from("hi"))));
}

#[test]
fn decode_encode_round_trip() {
    let store = from_json(CORPUS).unwrap();
    let text = to_json(&store, false).unwrap();

    // Re-decoding the rendered text lands on the same flat view.
    let reparsed = from_json(&text).unwrap();
    assert_eq!(reparsed.all(false), store.all(false));
}

#[test]
fn to_nested_matches_the_decoded_tree() {
    let store = from_json(CORPUS).unwrap();

    let expected = Value::Map(btree! {
        "test".into() => Value::from("a"),
        "test01".into() => Value::Map(btree! {
            "a".into() => Value::Map(btree! {
                "avt".into() => Value::from("hi"),
            }),
        }),
        "abc".into() => Value::Array(vec![
            Value::Map(btree! { "qw".into() => Value::Integer(1) }),
            Value::Map(btree! { "qw".into() => Value::Integer(2) }),
            Value::Map(btree! { "qw".into() => Value::Integer(3) }),
        ]),
        "dca".into() => Value::Array(vec![
            Value::from(vec![1, 2, 3]),
            Value::from(vec![4, 5, 6]),
        ]),
    });

    assert_eq!(store.to_nested(true), expected);
}

#[test]
fn mutations_survive_the_encode_boundary() {
    let mut store = from_json(CORPUS).unwrap();

    store.delete("test");
    store.add("abc.3.qw", 4);

    let text = to_json(&store, false).unwrap();
    let reparsed = from_json(&text).unwrap();

    assert_eq!(reparsed.get("test"), None);
    assert_eq!(reparsed.get("abc.3.qw"), Some(Entry::Leaf(Value::Integer(4))));
}

#[test]
fn merged_documents_encode_with_later_values() {
    let a = from_json(r#"{"root": {"1": {"test": "aaa"}}}"#).unwrap();
    let b = from_json(r#"{"root": {"1": {"test": "111"}}}"#).unwrap();

    let forward = merge([a.clone(), b.clone()]);
    assert_eq!(
        forward.get("root.1.test"),
        Some(Entry::Leaf(Value::from("111")))
    );

    let reverse = merge([b, a]);
    assert_eq!(
        reverse.get("root.1.test"),
        Some(Entry::Leaf(Value::from("aaa")))
    );
}

#[test]
fn namespaced_export_and_namespace_blind_lookup() {
    let mut store = FlatStore::new();
    store.add("test", "a");
    store.set_namespace("test.namespace");

    assert_eq!(
        to_json(&store, true).unwrap(),
        r#"{"test":{"namespace":{"test":"a"}}}"#
    );

    // The namespace decorates exports only.
    assert_eq!(store.get("test"), Some(Entry::Leaf(Value::from("a"))));
    assert_eq!(to_json(&store, false).unwrap(), r#"{"test":"a"}"#);
}
