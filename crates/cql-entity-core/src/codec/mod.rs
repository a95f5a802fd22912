// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Value transcoders between the object model and the store.
//!
//! A codec declares a source type (object side) and a target type (store
//! side) and converts [`Value`]s in both directions. Codecs are resolved once
//! per property at bootstrap and shared by reference afterwards; encode and
//! decode never mutate the codec.
//!
//! # Variants
//!
//! ```text
//! PropertyCodec (per property, see meta)
//! ├── ScalarCodec
//! │   ├── Native(NativeType)      passthrough
//! │   ├── Byte                    i8      <-> blob[1]
//! │   ├── ByteArray               Vec<u8> <-> blob
//! │   ├── BoxedByteArray          [i8]    <-> blob
//! │   ├── EnumByName              variant <-> text
//! │   ├── EnumByOrdinal           variant <-> int
//! │   ├── Json                    document <-> text
//! │   └── Custom(Arc<dyn Codec>)  user supplied
//! ├── ListCodec / SetCodec        one element codec
//! └── MapCodec                    key codec + value codec
//! ```
//!
//! Resolution is done by [`CodecResolver`]; classification of a raw type is
//! the pure function [`classify`].
//!
//! # Custom Codecs
//!
//! ```rust
//! use cql_entity_core::{Codec, CodecError, NativeType, RawType, Value};
//!
//! #[derive(Debug, Default)]
//! struct IntToText;
//!
//! impl Codec for IntToText {
//!     fn name(&self) -> &str {
//!         "IntToText"
//!     }
//!
//!     fn source_type(&self) -> RawType {
//!         RawType::Native(NativeType::Int)
//!     }
//!
//!     fn target_type(&self) -> RawType {
//!         RawType::Native(NativeType::Text)
//!     }
//!
//!     fn encode(&self, value: &Value) -> Result<Value, CodecError> {
//!         match value {
//!             Value::Int(i) => Ok(Value::Text(i.to_string())),
//!             other => Ok(other.clone())
//!         }
//!     }
//!
//!     fn decode(&self, value: &Value) -> Result<Value, CodecError> {
//!         match value {
//!             Value::Text(s) => s.parse().map(Value::Int).map_err(|e| CodecError::Custom {
//!                 codec:   self.name().to_string(),
//!                 message: format!("{e}")
//!             }),
//!             other => Ok(other.clone())
//!         }
//!     }
//! }
//!
//! assert_eq!(IntToText.encode(&Value::Int(7)).unwrap(), Value::Text("7".to_string()));
//! ```

mod collection;
mod json;
mod resolver;
mod scalar;

use std::fmt;

pub use collection::{ListCodec, MapCodec, SetCodec};
pub use json::{JsonCodec, JsonMapper, JsonMapperFactory, SerdeJsonMapper, SerdeJsonMapperFactory};
pub use resolver::CodecResolver;
pub use scalar::{CodecKind, ScalarCodec, classify};

use crate::{error::CodecError, types::RawType, value::Value};

/// A bidirectional value transcoder.
///
/// Implementations must be stateless with respect to encode and decode so a
/// single instance can serve concurrent callers.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Codec name used in error messages.
    fn name(&self) -> &str;

    /// Object-side type.
    fn source_type(&self) -> RawType;

    /// Store-side type.
    fn target_type(&self) -> RawType;

    /// Convert an object-side value to its store representation.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when `value` does not have the source shape.
    fn encode(&self, value: &Value) -> Result<Value, CodecError>;

    /// Convert a store value back to its object-side representation.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when `value` does not have the target shape.
    fn decode(&self, value: &Value) -> Result<Value, CodecError>;
}

/// Marker for the identity codec in `#[codec(..)]` and
/// `#[type_transformer(..)]` attributes.
///
/// The derive turns it into [`CodecClass::identity`](crate::CodecClass::identity).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

pub(crate) fn unexpected(codec: &str, expected: impl fmt::Display, actual: &Value) -> CodecError {
    CodecError::UnexpectedValue {
        codec:    codec.to_string(),
        expected: expected.to_string(),
        actual:   actual.kind().to_string()
    }
}
