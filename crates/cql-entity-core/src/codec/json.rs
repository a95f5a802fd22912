// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! JSON-fallback codec and the injected JSON service.

use std::{fmt, sync::Arc};

use super::{Codec, unexpected};
use crate::{
    error::CodecError,
    types::{NativeType, RawType},
    value::Value
};

/// Serializes documents of one object type.
pub trait JsonMapper: Send + Sync + fmt::Debug {
    /// Render a document as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] when the document cannot be written.
    fn write(&self, document: &serde_json::Value) -> Result<String, CodecError>;

    /// Parse JSON text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] for malformed input.
    fn read(&self, text: &str) -> Result<serde_json::Value, CodecError>;
}

/// Hands out a [`JsonMapper`] per object type.
pub trait JsonMapperFactory: Send + Sync + fmt::Debug {
    /// Mapper for the named type.
    fn mapper(&self, type_name: &str) -> Arc<dyn JsonMapper>;
}

/// [`JsonMapper`] backed by `serde_json`.
#[derive(Debug, Clone)]
pub struct SerdeJsonMapper {
    type_name: String
}

impl JsonMapper for SerdeJsonMapper {
    fn write(&self, document: &serde_json::Value) -> Result<String, CodecError> {
        serde_json::to_string(document).map_err(|e| self.error(&e))
    }

    fn read(&self, text: &str) -> Result<serde_json::Value, CodecError> {
        serde_json::from_str(text).map_err(|e| self.error(&e))
    }
}

impl SerdeJsonMapper {
    fn error(&self, e: &serde_json::Error) -> CodecError {
        CodecError::Json {
            type_name: self.type_name.clone(),
            message:   e.to_string()
        }
    }
}

/// Default factory producing [`SerdeJsonMapper`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonMapperFactory;

impl JsonMapperFactory for SerdeJsonMapperFactory {
    fn mapper(&self, type_name: &str) -> Arc<dyn JsonMapper> {
        Arc::new(SerdeJsonMapper {
            type_name: type_name.to_string()
        })
    }
}

/// Stores any object type as JSON text.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    source: RawType,
    mapper: Arc<dyn JsonMapper>
}

impl JsonCodec {
    /// JSON codec for `source` using `mapper`.
    #[must_use]
    pub fn new(source: RawType, mapper: Arc<dyn JsonMapper>) -> Self {
        Self {
            source,
            mapper
        }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        "Json"
    }

    fn source_type(&self) -> RawType {
        self.source.clone()
    }

    fn target_type(&self) -> RawType {
        RawType::Native(NativeType::Text)
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Json(document) => self.mapper.write(document).map(Value::Text),
            other => Err(unexpected(self.name(), "json", other))
        }
    }

    fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Text(text) => self.mapper.read(text).map(Value::Json),
            other => Err(unexpected(self.name(), NativeType::Text, other))
        }
    }
}
