// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Boolean-token codec.

use super::Codec;
use crate::error::CodecError;
use crate::value::Value;

const NAME: &str = "boolean";

/// Accepts exactly `True`, `true`, `False`, `false`; writes lowercase.
///
/// Integers are never treated as booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        match raw {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            _ => Err(CodecError::decode(NAME, "not a boolean token")),
        }
    }

    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Bool(true) => Ok("true".to_owned()),
            Value::Bool(false) => Ok("false".to_owned()),
            other => Err(CodecError::encode(NAME, other.kind())),
        }
    }
}
