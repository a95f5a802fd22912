// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! List, set and map codecs composed from scalar codecs.

use super::{Codec, ScalarCodec, unexpected};
use crate::{error::CodecError, types::RawType, value::Value};

/// List codec: transcodes every element with one scalar codec.
#[derive(Debug, Clone)]
pub struct ListCodec {
    element: ScalarCodec
}

/// Set codec: transcodes every element with one scalar codec.
#[derive(Debug, Clone)]
pub struct SetCodec {
    element: ScalarCodec
}

/// Map codec with independent key and value codecs.
#[derive(Debug, Clone)]
pub struct MapCodec {
    key:   ScalarCodec,
    value: ScalarCodec
}

fn transcode_all(
    items: &[Value],
    f: impl Fn(&Value) -> Result<Value, CodecError>
) -> Result<Vec<Value>, CodecError> {
    items.iter().map(f).collect()
}

macro_rules! element_codec {
    ($codec:ident, $variant:ident, $label:literal) => {
        impl $codec {
            /// Wrap an element codec.
            #[must_use]
            pub const fn new(element: ScalarCodec) -> Self {
                Self {
                    element
                }
            }

            /// The element codec.
            #[must_use]
            pub const fn element(&self) -> &ScalarCodec {
                &self.element
            }

            /// Element source type.
            #[must_use]
            pub fn source_type(&self) -> RawType {
                self.element.source_type()
            }

            /// Element target type.
            #[must_use]
            pub fn target_type(&self) -> RawType {
                self.element.target_type()
            }

            /// Encode every element.
            ///
            /// # Errors
            ///
            /// Returns the first element error, or a shape error when `value`
            /// is not a collection of the right kind.
            pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
                match value {
                    Value::Null => Ok(Value::Null),
                    Value::$variant(items) => {
                        transcode_all(items, |v| self.element.encode(v)).map(Value::$variant)
                    }
                    other => Err(unexpected($label, $label, other))
                }
            }

            /// Decode every element.
            ///
            /// # Errors
            ///
            /// Returns the first element error, or a shape error when `value`
            /// is not a collection of the right kind.
            pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
                match value {
                    Value::Null => Ok(Value::Null),
                    Value::$variant(items) => {
                        transcode_all(items, |v| self.element.decode(v)).map(Value::$variant)
                    }
                    other => Err(unexpected($label, $label, other))
                }
            }
        }
    };
}

element_codec!(ListCodec, List, "list");
element_codec!(SetCodec, Set, "set");

impl MapCodec {
    /// Compose a key codec and a value codec.
    #[must_use]
    pub const fn new(key: ScalarCodec, value: ScalarCodec) -> Self {
        Self {
            key,
            value
        }
    }

    /// The key codec.
    #[must_use]
    pub const fn key(&self) -> &ScalarCodec {
        &self.key
    }

    /// The value codec.
    #[must_use]
    pub const fn value(&self) -> &ScalarCodec {
        &self.value
    }

    /// Key source type.
    #[must_use]
    pub fn key_source_type(&self) -> RawType {
        self.key.source_type()
    }

    /// Key target type.
    #[must_use]
    pub fn key_target_type(&self) -> RawType {
        self.key.target_type()
    }

    /// Value source type.
    #[must_use]
    pub fn value_source_type(&self) -> RawType {
        self.value.source_type()
    }

    /// Value target type.
    #[must_use]
    pub fn value_target_type(&self) -> RawType {
        self.value.target_type()
    }

    /// Encode every entry.
    ///
    /// # Errors
    ///
    /// Returns the first key or value error.
    pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((self.key.encode(k)?, self.value.encode(v)?)))
                .collect::<Result<Vec<_>, CodecError>>()
                .map(Value::Map),
            other => Err(unexpected("map", "map", other))
        }
    }

    /// Decode every entry.
    ///
    /// # Errors
    ///
    /// Returns the first key or value error.
    pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((self.key.decode(k)?, self.value.decode(v)?)))
                .collect::<Result<Vec<_>, CodecError>>()
                .map(Value::Map),
            other => Err(unexpected("map", "map", other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnumDescriptor, NativeType};

    fn color() -> EnumDescriptor {
        EnumDescriptor::new("app::Color", ["Red", "Green"])
    }

    #[test]
    fn list_shares_element_types() {
        let codec = ListCodec::new(ScalarCodec::EnumByOrdinal(color()));
        assert_eq!(codec.source_type(), RawType::Enum(color()));
        assert_eq!(codec.target_type(), RawType::Native(NativeType::Int));
    }

    #[test]
    fn list_round_trip() {
        let codec = ListCodec::new(ScalarCodec::EnumByOrdinal(color()));
        let value = Value::List(vec![
            Value::Enum("Green".to_string()),
            Value::Enum("Red".to_string()),
        ]);
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(encoded, Value::List(vec![Value::Int(1), Value::Int(0)]));
        assert_eq!(codec.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn set_rejects_list_values() {
        let codec = SetCodec::new(ScalarCodec::Native(NativeType::Text));
        assert!(codec.encode(&Value::List(Vec::new())).is_err());
    }

    #[test]
    fn map_round_trip() {
        let codec = MapCodec::new(
            ScalarCodec::EnumByName(color()),
            ScalarCodec::Native(NativeType::BigInt)
        );
        let value = Value::Map(vec![(Value::Enum("Red".to_string()), Value::BigInt(3))]);
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(
            encoded,
            Value::Map(vec![(Value::Text("Red".to_string()), Value::BigInt(3))])
        );
        assert_eq!(codec.decode(&encoded).unwrap(), value);
        assert_eq!(codec.key_target_type(), RawType::Native(NativeType::Text));
        assert_eq!(codec.value_source_type(), RawType::Native(NativeType::BigInt));
    }
}
