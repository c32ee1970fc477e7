// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Strict JSON codec.

use super::Codec;
use crate::error::CodecError;
use crate::value::{SetPolicy, Value};

const NAME: &str = "json";

/// Strict JSON grammar via `serde_json`.
///
/// Decodes numbers, double-quoted strings, arrays, objects and
/// `null`/`true`/`false`. Integers outside `i64` are declined. Encodes every
/// value with a JSON shape; sets and non-finite floats are declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        let json: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CodecError::decode(NAME, e.to_string()))?;
        // serde_json reads integers beyond u64 as floats.
        if has_oversized_integer(raw) {
            return Err(CodecError::decode(NAME, "integer out of range"));
        }
        Value::from_json(json).ok_or_else(|| CodecError::decode(NAME, "integer out of range"))
    }

    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        let json = value
            .to_json(SetPolicy::Reject)
            .map_err(|kind| CodecError::encode(NAME, kind))?;
        serde_json::to_string(&json).map_err(|_| CodecError::encode(NAME, value.kind()))
    }
}

/// Whether valid JSON `text` holds an integer token outside `i64`.
fn has_oversized_integer(text: &str) -> bool {
    let mut chars = text.char_indices().peekable();
    let mut in_string = false;

    while let Some((start, c)) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '-' | '0'..='9' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if !matches!(d, '0'..='9' | '.' | 'e' | 'E' | '+' | '-') {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let token = &text[start..end];
                if !token.contains(['.', 'e', 'E']) && token.parse::<i64>().is_err() {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
