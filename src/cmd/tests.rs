// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use insta::assert_snapshot;

use super::codec::{format_decode, format_encode};
use super::inspect::format_get;
use super::run::apply_assignments;
use crate::cli::GetArgs;
use crate::codec::CodecRegistry;
use crate::facade::Env;
use crate::store::MemEnv;

fn get_args(name: &str, raw: bool) -> GetArgs {
    GetArgs {
        name: name.to_owned(),
        raw,
    }
}

#[test]
fn test_format_get() {
    let env = Env::new(MemEnv::from_pairs([("CFG", "{'hosts': ('a', 'b'), 'on': True}")]));

    assert_snapshot!(
        format_get(&env, &get_args("CFG", false)).unwrap(),
        @r#""{'hosts': ('a', 'b'), 'on': True}""#
    );

    env.enable_auto_cast();
    assert_snapshot!(
        format_get(&env, &get_args("CFG", false)).unwrap(),
        @r#"{"hosts":["a","b"],"on":true}"#
    );
    assert_snapshot!(
        format_get(&env, &get_args("CFG", true)).unwrap(),
        @"{'hosts': ('a', 'b'), 'on': True}"
    );
    assert_snapshot!(
        format_get(&env, &get_args("is_auto_cast_enabled", false)).unwrap(),
        @"true"
    );
}

#[test]
fn test_format_get_missing() {
    let env = Env::new(MemEnv::new());
    let err = format_get(&env, &get_args("NOPE", true)).unwrap_err();
    assert_snapshot!(err, @"variable 'NOPE' is not set");
}

#[test]
fn test_format_decode() {
    let codecs = CodecRegistry::standard();
    assert_eq!(
        format_decode(&codecs, "3.14"),
        ["codec: json", "kind:  float", "value: 3.14"]
    );
    assert_eq!(
        format_decode(&codecs, "True"),
        ["codec: boolean", "kind:  bool", "value: True"]
    );
    assert_eq!(
        format_decode(&codecs, "{1, 2}"),
        ["codec: collection", "kind:  set", "value: {1, 2}"]
    );
    assert_eq!(
        format_decode(&codecs, "plain text"),
        ["codec: none", "kind:  str", "value: 'plain text'"]
    );
}

#[test]
fn test_format_encode() {
    let codecs = CodecRegistry::standard();
    assert_snapshot!(format_encode(&codecs, "{'a': (1, 2)}").unwrap(), @r#"{"a":[1,2]}"#);
    assert_snapshot!(format_encode(&codecs, "True").unwrap(), @"true");
    assert_snapshot!(format_encode(&codecs, "hello").unwrap(), @"hello");
}

#[test]
fn test_apply_assignments() {
    let env = Env::new(MemEnv::new());
    apply_assignments(
        &env,
        &[
            ("PORTS".to_owned(), "[80, 443]".to_owned()),
            ("DEBUG".to_owned(), "True".to_owned()),
            ("NAME".to_owned(), "svc".to_owned()),
        ],
    )
    .unwrap();

    assert_eq!(env.get_raw("PORTS").as_deref(), Some("[80,443]"));
    assert_eq!(env.get_raw("DEBUG").as_deref(), Some("true"));
    assert_eq!(env.get_raw("NAME").as_deref(), Some("svc"));
}

#[test]
fn test_apply_assignments_reserved_name() {
    let env = Env::new(MemEnv::new());
    let err = apply_assignments(&env, &[("enable_auto_cast".to_owned(), "1".to_owned())])
        .unwrap_err();
    assert_snapshot!(
        format!("{err:#}"),
        @"failed to set 'enable_auto_cast': own field 'enable_auto_cast' cannot be reinitialized"
    );
}

#[cfg(unix)]
#[test]
fn test_run_command_sees_encoded_values() {
    use super::run::run_command;
    use crate::cli::RunArgs;

    let env = Env::new(MemEnv::from_process());
    let args = RunArgs {
        assignments: vec![("SMART_ENV_TEST_PORTS".to_owned(), "(80, 443)".to_owned())],
        command: vec![
            "sh".to_owned(),
            "-c".to_owned(),
            r#"test "$SMART_ENV_TEST_PORTS" = "[80,443]""#.to_owned(),
        ],
    };
    assert_eq!(run_command(&env, &args).unwrap(), 0);

    let failing = RunArgs {
        assignments: Vec::new(),
        command: vec!["sh".to_owned(), "-c".to_owned(), "exit 3".to_owned()],
    };
    assert_eq!(run_command(&env, &failing).unwrap(), 3);
    assert!(std::env::var_os("SMART_ENV_TEST_PORTS").is_none());
}
