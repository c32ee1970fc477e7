// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{SetPolicy, Value};
use crate::codec::literal;
use crate::error::EnvError;

#[test]
fn test_set_drops_duplicates() {
    let set = Value::set([1, 2, 2, 3, 1]);
    match &set {
        Value::Set(items) => assert_eq!(items.len(), 3),
        other => panic!("expected set, got {other:?}"),
    }
}

#[test]
fn test_set_equality_ignores_order() {
    assert_eq!(Value::set([1, 2, 3]), Value::set([3, 1, 2]));
    assert_ne!(Value::set([1, 2, 3]), Value::set([1, 2]));
    assert_ne!(Value::set([1, 2]), Value::from(vec![1, 2]));
}

#[test]
fn test_set_numbers_of_equal_value_collapse() {
    let set = Value::set([Value::Int(1), Value::Bool(true), Value::Float(1.0), Value::Int(2)]);
    match &set {
        Value::Set(items) => assert_eq!(items, &[Value::Int(1), Value::Int(2)]),
        other => panic!("expected set, got {other:?}"),
    }

    assert_eq!(Value::set([Value::Bool(false)]), Value::set([0]));
    assert_eq!(Value::set([Value::Float(2.0)]), Value::set([2]));
    assert_ne!(Value::set([Value::Float(2.5)]), Value::set([2]));
    assert_eq!(
        Value::set([Value::tuple([Value::Bool(true), Value::from("a")])]),
        Value::set([Value::tuple([Value::Int(1), Value::from("a")])])
    );
}

#[test]
fn test_same_element_edges() {
    assert!(!Value::Int(1).same_element(&Value::from("1")));
    assert!(!Value::Float(f64::NAN).same_element(&Value::Float(f64::NAN)));
    assert!(!Value::Float(9.223_372_036_854_776e18).same_element(&Value::Int(i64::MAX)));
    assert!(Value::Float(-9.223_372_036_854_776e18).same_element(&Value::Int(i64::MIN)));
    assert!(Value::Null.same_element(&Value::Null));
}

#[test]
fn test_accessors() {
    assert_eq!(Value::from("text").as_str(), Some("text"));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Int(-3).as_i64(), Some(-3));
    assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));

    // No coercion between shapes
    assert_eq!(Value::Int(1).as_bool(), None);
    assert_eq!(Value::Bool(true).as_i64(), None);
    assert_eq!(Value::Int(2).as_f64(), None);
    assert_eq!(Value::from(vec!["a"]).as_str(), None);
}

#[test]
fn test_list_and_tuple_are_distinct() {
    assert_ne!(Value::tuple([1, 2]), Value::from(vec![1, 2]));
    assert_eq!(Value::tuple([1, 2]), Value::tuple([1, 2]));
}

#[test]
fn test_int_and_float_are_distinct() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn test_display_literal_form() {
    let mut map = BTreeMap::new();
    map.insert("debug".to_string(), Value::Bool(true));
    map.insert("hosts".to_string(), Value::from(vec!["a", "b"]));
    map.insert("port".to_string(), Value::Int(5432));
    map.insert("ratio".to_string(), Value::Float(0.5));
    map.insert("none".to_string(), Value::Null);

    insta::assert_snapshot!(
        Value::Map(map).to_string(),
        @"{'debug': True, 'hosts': ['a', 'b'], 'none': None, 'port': 5432, 'ratio': 0.5}"
    );
}

#[test]
fn test_display_tuples_and_sets() {
    insta::assert_snapshot!(Value::tuple([1]).to_string(), @"(1,)");
    insta::assert_snapshot!(Value::tuple(Vec::<Value>::new()).to_string(), @"()");
    insta::assert_snapshot!(Value::tuple(["x", "y"]).to_string(), @"('x', 'y')");
    insta::assert_snapshot!(Value::set(Vec::<Value>::new()).to_string(), @"set()");
    insta::assert_snapshot!(Value::set([7]).to_string(), @"{7}");
}

#[test]
fn test_display_parses_back() {
    let mut map = BTreeMap::new();
    map.insert("tags".to_string(), Value::set(["x"]));
    map.insert("pair".to_string(), Value::tuple([Value::Null, Value::Float(-1.5)]));

    for value in [
        Value::set(Vec::<Value>::new()),
        Value::from(vec![Value::set(Vec::<Value>::new())]),
        Value::tuple([1]),
        Value::tuple(Vec::<Value>::new()),
        Value::set([3, 1, 2]),
        Value::from("it's \"quoted\"\n"),
        Value::Map(map),
    ] {
        let text = value.to_string();
        assert_eq!(literal::parse(&text), Ok(value), "{text}");
    }
}

#[test]
fn test_display_string_quoting() {
    insta::assert_snapshot!(Value::from("plain").to_string(), @"'plain'");
    insta::assert_snapshot!(Value::from("it's").to_string(), @r#""it's""#);
    insta::assert_snapshot!(Value::from("a\nb").to_string(), @r"'a\nb'");
    insta::assert_snapshot!(Value::from(r#"both ' and ""#).to_string(), @r#"'both \' and "'"#);
}

#[test]
fn test_to_json_rejects_sets_unless_asked() {
    let nested = Value::from(vec![Value::set([1])]);
    assert_eq!(nested.to_json(SetPolicy::Reject), Err("set"));

    let json = nested
        .to_json(SetPolicy::AsArray)
        .expect("sets convert as arrays");
    assert_eq!(json, serde_json::json!([[1]]));
}

#[test]
fn test_to_json_rejects_non_finite_float() {
    assert_eq!(Value::Float(f64::NAN).to_json(SetPolicy::AsArray), Err("float"));
    assert_eq!(
        Value::Float(f64::INFINITY).to_json(SetPolicy::Reject),
        Err("float")
    );
}

#[test]
fn test_from_json_numbers() {
    assert_eq!(Value::from_json(serde_json::json!(-20)), Some(Value::Int(-20)));
    assert_eq!(Value::from_json(serde_json::json!(3.14)), Some(Value::Float(3.14)));
    assert_eq!(Value::from_json(serde_json::json!(u64::MAX)), None);
}

#[test]
fn test_from_serialize_struct() {
    #[derive(serde::Serialize)]
    struct Database {
        host: &'static str,
        port: u16,
    }

    let value = Value::from_serialize(&Database {
        host: "localhost",
        port: 5432,
    })
    .expect("plain struct serializes");

    let mut expected = BTreeMap::new();
    expected.insert("host".to_string(), Value::from("localhost"));
    expected.insert("port".to_string(), Value::Int(5432));
    assert_eq!(value, Value::Map(expected));
}

#[test]
fn test_from_serialize_composite_keys_fail() {
    let mut map = HashMap::new();
    map.insert((1, 2), "pair");

    let err = Value::from_serialize(&map).expect_err("tuple keys have no JSON shape");
    match err {
        EnvError::NotSerializable { type_name } => {
            assert!(type_name.contains("HashMap"), "type name was {type_name}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_deserialize_into_struct() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Sentry {
        dsn: String,
        tags: Vec<String>,
    }

    let mut map = BTreeMap::new();
    map.insert("dsn".to_string(), Value::from("https://key@host/1"));
    map.insert("tags".to_string(), Value::set(["web"]));

    let sentry: Sentry = Value::Map(map)
        .deserialize_into()
        .expect("shape matches");
    assert_eq!(
        sentry,
        Sentry {
            dsn: "https://key@host/1".to_string(),
            tags: vec!["web".to_string()],
        }
    );
}

#[test]
fn test_serialize_as_json() {
    let value = Value::from(vec![Value::Null, Value::tuple([1, 2]), Value::from("x")]);
    let text = serde_json::to_string(&value).expect("serializes");
    insta::assert_snapshot!(text, @r#"[null,[1,2],"x"]"#);
}
