// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::parse;
use crate::value::Value;

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn test_parse_keywords() {
    assert_eq!(parse("True"), Ok(Value::Bool(true)));
    assert_eq!(parse("False"), Ok(Value::Bool(false)));
    assert_eq!(parse("None"), Ok(Value::Null));
}

#[test]
fn test_parse_integers() {
    assert_eq!(parse("42"), Ok(Value::Int(42)));
    assert_eq!(parse("-20"), Ok(Value::Int(-20)));
    assert_eq!(parse("+7"), Ok(Value::Int(7)));
    assert_eq!(parse("1_000_000"), Ok(Value::Int(1_000_000)));
    assert_eq!(parse("0x1F"), Ok(Value::Int(31)));
    assert_eq!(parse("0o17"), Ok(Value::Int(15)));
    assert_eq!(parse("0b101"), Ok(Value::Int(5)));
    assert_eq!(parse("000"), Ok(Value::Int(0)));
    assert_eq!(parse("-9223372036854775808"), Ok(Value::Int(i64::MIN)));
}

#[test]
fn test_parse_radix_underscore_after_prefix() {
    assert_eq!(parse("0x_ff"), Ok(Value::Int(255)));
    assert_eq!(parse("0b_1"), Ok(Value::Int(1)));
    assert_eq!(parse("0o_7_7"), Ok(Value::Int(63)));
    assert_eq!(parse("-0X_1_0"), Ok(Value::Int(-16)));
    for input in ["0x__ff", "0x_", "0xff_", "0b_1__0", "0_1"] {
        assert!(parse(input).is_err(), "{input:?} should not parse");
    }
}

#[test]
fn test_parse_floats() {
    assert_eq!(parse("3.14"), Ok(Value::Float(3.14)));
    assert_eq!(parse(".5"), Ok(Value::Float(0.5)));
    assert_eq!(parse("5."), Ok(Value::Float(5.0)));
    assert_eq!(parse("1e3"), Ok(Value::Float(1000.0)));
    assert_eq!(parse("-2.5e-1"), Ok(Value::Float(-0.25)));
}

#[test]
fn test_parse_rejects_bad_numbers() {
    for input in ["0123", "1__0", "1_", "9223372036854775808", "1e400", "1abc", "1..2", "--5"] {
        assert!(parse(input).is_err(), "{input:?} should not parse");
    }
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn test_parse_quoted_strings() {
    assert_eq!(parse("'single'"), Ok(Value::from("single")));
    assert_eq!(parse("\"double\""), Ok(Value::from("double")));
    assert_eq!(parse(r"'it\'s'"), Ok(Value::from("it's")));
    assert_eq!(parse(r"'tab\there'"), Ok(Value::from("tab\there")));
    assert_eq!(parse(r"'\x41\u00e9\U0001F600'"), Ok(Value::from("Aé😀")));
    assert_eq!(parse(r"'\101'"), Ok(Value::from("A")));
}

#[test]
fn test_parse_string_prefixes_and_concatenation() {
    assert_eq!(parse(r"r'C:\temp'"), Ok(Value::from(r"C:\temp")));
    assert_eq!(parse("u'text'"), Ok(Value::from("text")));
    assert_eq!(parse("'abc' \"def\""), Ok(Value::from("abcdef")));
    assert!(parse("b'bytes'").is_err());
}

#[test]
fn test_parse_rejects_unterminated_string() {
    let err = parse("'open").expect_err("unterminated");
    insta::assert_snapshot!(err.to_string(), @"unterminated string at offset 5");
}

// =============================================================================
// Collections
// =============================================================================

#[test]
fn test_parse_list_with_single_quotes() {
    assert_eq!(
        parse("['Hello', ['world']]"),
        Ok(Value::from(vec![
            Value::from("Hello"),
            Value::from(vec!["world"]),
        ]))
    );
}

#[test]
fn test_parse_trailing_commas() {
    assert_eq!(parse("[1, 2,]"), Ok(Value::from(vec![1, 2])));
    assert_eq!(parse("{'a': 1,}"), Ok(map(&[("a", Value::Int(1))])));
    assert_eq!(parse("{1, 2,}"), Ok(Value::set([1, 2])));
}

#[test]
fn test_parse_tuples() {
    assert_eq!(parse("()"), Ok(Value::Tuple(vec![])));
    assert_eq!(parse("(1,)"), Ok(Value::tuple([1])));
    assert_eq!(parse("(1, 'a')"), Ok(Value::tuple([Value::Int(1), Value::from("a")])));
    assert_eq!(parse("(1)"), Ok(Value::Int(1)));
    assert_eq!(parse("1, 2"), Ok(Value::tuple([1, 2])));
    assert_eq!(parse("1,"), Ok(Value::tuple([1])));
}

#[test]
fn test_parse_sets() {
    assert_eq!(parse("{'1', '2', '3'}"), Ok(Value::set(["1", "2", "3"])));
    assert_eq!(parse("{1, 1, 2}"), Ok(Value::set([1, 2])));
    assert_eq!(parse("{(1, 2)}"), Ok(Value::set([Value::tuple([1, 2])])));
}

#[test]
fn test_parse_sets_collapse_equal_numbers() {
    let parsed = parse("{1, True}").unwrap();
    assert_eq!(parsed, Value::set([1]));
    assert_eq!(parsed.to_string(), "{1}");

    assert_eq!(parse("{1, 1.0, 2}"), Ok(Value::set([1, 2])));
    assert_eq!(parse("{False, 0, 0.0}").unwrap().to_string(), "{False}");
}

#[test]
fn test_parse_empty_set() {
    assert_eq!(parse("set()"), Ok(Value::Set(Vec::new())));
    assert_eq!(parse("set ( )"), Ok(Value::Set(Vec::new())));
    assert_eq!(
        parse("[set(), {1}]"),
        Ok(Value::from(vec![Value::set(Vec::<Value>::new()), Value::set([1])]))
    );
    assert_eq!(parse("{'tags': set(\n)}").unwrap().to_string(), "{'tags': set()}");
}

#[test]
fn test_parse_rejects_other_set_calls() {
    let err = parse("set").expect_err("bare name");
    insta::assert_snapshot!(err.to_string(), @"unknown name 'set' at offset 0");
    let err = parse("set([1])").expect_err("argument");
    insta::assert_snapshot!(err.to_string(), @"expected ')' at offset 4");
    assert!(parse("set(").is_err());
    assert!(parse("frozenset()").is_err());
}

#[test]
fn test_parse_mixed_quote_dict() {
    assert_eq!(
        parse("{'key': 'value', \"key2\": \"value\"}"),
        Ok(map(&[
            ("key", Value::from("value")),
            ("key2", Value::from("value")),
        ]))
    );
}

#[test]
fn test_parse_empty_braces_is_map() {
    assert_eq!(parse("{}"), Ok(map(&[])));
}

#[test]
fn test_parse_multiline_inside_brackets() {
    let input = "{\n    'hosts': ['a',\n              'b'],\n}\n";
    assert_eq!(
        parse(input),
        Ok(map(&[("hosts", Value::from(vec!["a", "b"]))]))
    );
}

#[test]
fn test_parse_rejects_newline_at_top_level() {
    assert!(parse("1\n2").is_err());
    assert!(parse("1,\n2").is_err());
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_parse_rejects_non_string_keys() {
    let err = parse("{1: 'a'}").expect_err("int keys");
    assert!(err.message.contains("dict keys must be strings"), "{err}");
}

#[test]
fn test_parse_rejects_unhashable_set_elements() {
    let err = parse("{[1], 2}").expect_err("list in set");
    insta::assert_snapshot!(err.to_string(), @"unhashable set element: list at offset 8");
}

#[test]
fn test_parse_rejects_plain_text() {
    for input in ["hello", "hello world", "/usr/bin", "", "   ", "[1, 2", "{'a' 1}", "[,]"] {
        assert!(parse(input).is_err(), "{input:?} should not parse");
    }
}

#[test]
fn test_parse_rejects_deep_nesting() {
    let input = format!("{}{}", "[".repeat(200), "]".repeat(200));
    let err = parse(&input).expect_err("too deep");
    assert!(err.message.contains("nesting too deep"), "{err}");
}
