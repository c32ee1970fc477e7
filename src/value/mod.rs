// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed value model shared by the codecs and the facade.
//!
//! ```text
//! Value
//!   scalars      Null | Bool | Int(i64) | Float(f64) | Str
//!   sequences    List | Tuple | Set (distinct, order-free equality)
//!   mapping      Map(BTreeMap<String, Value>)
//!
//! JSON bridge    to_json(SetPolicy) / from_json()
//! Literal form   Display: ['a', 1], (1,), {1, 2}, {'k': True}, None
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{EnvError, EnvResult};

/// A decoded environment value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Self>),
    Tuple(Vec<Self>),
    /// Distinct elements; build through [`Value::set`] to keep them so.
    /// Numbers of equal value are one element: `{1, True, 1.0}` is `{1}`.
    Set(Vec<Self>),
    Map(BTreeMap<String, Self>),
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn equals(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                // 2^63 is exact in f64; anything at or past it cannot be an i64
                f.fract() == 0.0 && f >= -(2_f64.powi(63)) && f < 2_f64.powi(63) && f as i64 == i
            }
        }
    }
}

/// How [`Value::to_json`] treats sets, which JSON has no shape for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPolicy {
    /// Any set makes the conversion fail.
    Reject,
    /// Sets become arrays in their stored order.
    AsArray,
}

impl Value {
    /// Builds a set, dropping duplicate elements.
    ///
    /// The first of several equal elements is kept; see
    /// [`same_element`](Self::same_element) for what counts as equal.
    pub fn set(items: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        let mut distinct: Vec<Self> = Vec::new();
        for item in items {
            let item = item.into();
            if !distinct.iter().any(|seen| seen.same_element(&item)) {
                distinct.push(item);
            }
        }
        Self::Set(distinct)
    }

    pub fn tuple(items: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Element identity inside sets.
    ///
    /// Like `==`, except that `Bool`, `Int` and `Float` compare by numeric
    /// value (`True` is `1`, `2.0` is `2`), also inside tuples.
    #[must_use]
    pub fn same_element(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Tuple(a), Self::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_element(y))
            }
            _ => match (self.numeric(), other.numeric()) {
                (Some(a), Some(b)) => a.equals(b),
                _ => self == other,
            },
        }
    }

    fn numeric(&self) -> Option<Number> {
        match self {
            Self::Bool(b) => Some(Number::Int(i64::from(*b))),
            Self::Int(i) => Some(Number::Int(*i)),
            Self::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Whether the value may be a set element.
    #[must_use]
    pub fn is_hashable(&self) -> bool {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_) => true,
            Self::Tuple(items) => items.iter().all(Self::is_hashable),
            Self::List(_) | Self::Set(_) | Self::Map(_) => false,
        }
    }

    /// Converts into a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns the kind of the first value with no JSON shape: a non-finite
    /// float, or a set under [`SetPolicy::Reject`].
    pub fn to_json(&self, sets: SetPolicy) -> Result<serde_json::Value, &'static str> {
        use serde_json::Value as Json;

        let seq = |items: &[Self]| -> Result<Json, &'static str> {
            items
                .iter()
                .map(|item| item.to_json(sets))
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array)
        };

        match self {
            Self::Null => Ok(Json::Null),
            Self::Bool(b) => Ok(Json::Bool(*b)),
            Self::Int(i) => Ok(Json::from(*i)),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .ok_or("float"),
            Self::Str(s) => Ok(Json::String(s.clone())),
            Self::List(items) | Self::Tuple(items) => seq(items),
            Self::Set(items) => match sets {
                SetPolicy::Reject => Err("set"),
                SetPolicy::AsArray => seq(items),
            },
            Self::Map(map) => map
                .iter()
                .map(|(k, v)| v.to_json(sets).map(|v| (k.clone(), v)))
                .collect::<Result<serde_json::Map<_, _>, _>>()
                .map(Json::Object),
        }
    }

    /// Converts from a JSON tree.
    ///
    /// Returns `None` for integers outside the `i64` range.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        use serde_json::Value as Json;

        Some(match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_f64() {
                    Self::Float(n.as_f64()?)
                } else {
                    return None;
                }
            }
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Option<_>>()?,
            ),
            Json::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect::<Option<_>>()?,
            ),
        })
    }

    /// Captures any serde-serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotSerializable`] naming `T` when serde rejects it
    /// (e.g. maps with composite keys) or it holds an out-of-range integer.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> EnvResult<Self> {
        serde_json::to_value(value)
            .ok()
            .and_then(Self::from_json)
            .ok_or(EnvError::NotSerializable {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Deserializes into `T`, treating sets and tuples as sequences.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the shape does not match `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let json = self
            .to_json(SetPolicy::AsArray)
            .map_err(|kind| <serde_json::Error as serde::de::Error>::custom(format!("non-finite {kind}")))?;
        serde_json::from_value(json)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => {
                let within = |x: &Self, ys: &[Self]| ys.iter().any(|y| x.same_element(y));
                a.len() == b.len()
                    && a.iter().all(|x| within(x, b))
                    && b.iter().all(|x| within(x, a))
            }
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl fmt::Display for Value {
    /// Literal form: the text the collection codec parses back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_nan() => f.write_str("nan"),
            Self::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_positive() { "inf" } else { "-inf" })
            }
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => f.write_str(&quote_literal(s)),
            Self::List(items) => {
                f.write_char('[')?;
                join(f, items)?;
                f.write_char(']')
            }
            Self::Tuple(items) => {
                f.write_char('(')?;
                join(f, items)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Self::Set(items) if items.is_empty() => f.write_str("set()"),
            Self::Set(items) => {
                f.write_char('{')?;
                join(f, items)?;
                f.write_char('}')
            }
            Self::Map(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {v}", quote_literal(k))?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Quotes a string as a literal, preferring single quotes.
pub(crate) fn quote_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// --- Conversions ---

macro_rules! impl_from_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(v: BTreeMap<String, T>) -> Self {
        Self::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests;
