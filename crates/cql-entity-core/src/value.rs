// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic values exchanged with codecs.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::NativeType;

/// A value on either side of a codec.
///
/// Object-model values use `Byte`, `Bytes`, `Enum`, `Json` and `Record` in
/// addition to the native scalars; store values only use the native scalars
/// and the collection variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// `boolean`.
    Boolean(bool),
    /// A single signed byte.
    Byte(i8),
    /// `int`.
    Int(i32),
    /// `bigint`, also used for counters.
    BigInt(i64),
    /// `varint`.
    Varint(BigInt),
    /// `float`.
    Float(f32),
    /// `double`.
    Double(f64),
    /// `decimal`.
    Decimal(Decimal),
    /// `text`.
    Text(String),
    /// `uuid` and `timeuuid`.
    Uuid(Uuid),
    /// `timestamp`.
    Timestamp(DateTime<Utc>),
    /// `inet`.
    Inet(IpAddr),
    /// `blob`.
    Blob(Vec<u8>),
    /// Object-side byte array.
    Bytes(Vec<u8>),
    /// Enum variant name.
    Enum(String),
    /// JSON document.
    Json(serde_json::Value),
    /// Ordered collection.
    List(Vec<Value>),
    /// Collection of unique elements.
    Set(Vec<Value>),
    /// Key/value pairs.
    Map(Vec<(Value, Value)>),
    /// Named components of a compound key.
    Record(Vec<(String, Value)>)
}

impl Value {
    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Variant name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Byte(_) => "byte",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Varint(_) => "varint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::Timestamp(_) => "timestamp",
            Self::Inet(_) => "inet",
            Self::Blob(_) => "blob",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Json(_) => "json",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Record(_) => "record"
        }
    }

    /// Whether this value has the runtime shape of `native`.
    #[must_use]
    pub const fn is_native(&self, native: NativeType) -> bool {
        matches!(
            (self, native),
            (Self::Boolean(_), NativeType::Boolean)
                | (Self::Timestamp(_), NativeType::Timestamp)
                | (Self::Double(_), NativeType::Double)
                | (Self::Float(_), NativeType::Float)
                | (Self::Decimal(_), NativeType::Decimal)
                | (Self::Inet(_), NativeType::Inet)
                | (Self::Int(_), NativeType::Int)
                | (Self::Varint(_), NativeType::Varint)
                | (Self::BigInt(_), NativeType::BigInt)
                | (Self::Text(_), NativeType::Text)
                | (Self::Uuid(_), NativeType::Uuid)
                | (Self::Blob(_), NativeType::Blob)
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
