// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Permissive collection-literal codec.

use super::{Codec, literal};
use crate::error::CodecError;
use crate::value::{SetPolicy, Value};

const NAME: &str = "collection";

/// Reads list, tuple, set and dict literals with either quote style.
///
/// Writes lists, tuples, sets and maps as JSON; set elements come out in
/// stored order, which callers must not rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionCodec;

impl Codec for CollectionCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn decode(&self, raw: &str) -> Result<Value, CodecError> {
        literal::parse(raw).map_err(|e| CodecError::decode(NAME, e.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        if !matches!(
            value,
            Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Map(_)
        ) {
            return Err(CodecError::encode(NAME, value.kind()));
        }
        let json = value
            .to_json(SetPolicy::AsArray)
            .map_err(|kind| CodecError::encode(NAME, kind))?;
        serde_json::to_string(&json).map_err(|_| CodecError::encode(NAME, value.kind()))
    }
}
