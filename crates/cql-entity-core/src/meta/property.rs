// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property descriptors and their builder.
//!
//! # Property Kinds
//!
//! | Kind | Selected by | Codec |
//! |------|-------------|-------|
//! | `Id` | `Id` annotation | scalar |
//! | `EmbeddedId` | `EmbeddedId` annotation | compound key |
//! | `Counter` | `Counter` annotation or [`Counter`](crate::Counter) type | counter |
//! | `List` / `Set` / `Map` | collection type | collection |
//! | `Simple` | anything else | scalar |
//!
//! A `Json` directive forces a collection-typed field into a `Simple`
//! property with a JSON codec.

use std::sync::Arc;

use tracing::debug;

use crate::{
    annotation::Annotation,
    codec::{Codec, CodecResolver, ListCodec, MapCodec, ScalarCodec, SetCodec, unexpected},
    config::{ConfigurationContext, ConsistencyLevel, ConsistencyPair},
    error::{CodecError, MappingError},
    introspect::resolve_raw_class,
    key::{ClusteringDirection, CompoundKeyDescriptor, KeyVocabulary, check_component},
    naming::NamingStrategy,
    reflect::FieldDescriptor,
    types::{ObjectType, RawType, TypeRef},
    value::Value
};

/// Role of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Scalar column.
    Simple,
    /// `list<T>` column.
    List,
    /// `set<T>` column.
    Set,
    /// `map<K, V>` column.
    Map,
    /// Simple primary key.
    Id,
    /// Compound primary key.
    EmbeddedId,
    /// Counter column.
    Counter
}

impl PropertyKind {
    /// Whether this is a list, set or map.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map)
    }

    /// Whether this is a primary key.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        matches!(self, Self::Id | Self::EmbeddedId)
    }
}

/// Secondary index on a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexDescriptor {
    /// Index name.
    pub name:   String,
    /// Indexed physical column.
    pub column: String
}

/// Codec of a whole property.
#[derive(Debug, Clone)]
pub enum PropertyCodec {
    /// Scalar value.
    Simple(ScalarCodec),
    /// List of scalars.
    List(ListCodec),
    /// Set of scalars.
    Set(SetCodec),
    /// Map of scalars.
    Map(MapCodec),
    /// Counter, `bigint` on both sides.
    Counter,
    /// Compound key record.
    Compound(Box<CompoundKeyDescriptor>)
}

impl PropertyCodec {
    /// Encode an object-side value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the value does not match the codec.
    pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match self {
            Self::Simple(codec) => codec.encode(value),
            Self::List(codec) => codec.encode(value),
            Self::Set(codec) => codec.encode(value),
            Self::Map(codec) => codec.encode(value),
            Self::Counter => counter(value),
            Self::Compound(key) => key.encode(value)
        }
    }

    /// Decode a store value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the value does not match the codec.
    pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        match self {
            Self::Simple(codec) => codec.decode(value),
            Self::List(codec) => codec.decode(value),
            Self::Set(codec) => codec.decode(value),
            Self::Map(codec) => codec.decode(value),
            Self::Counter => counter(value),
            Self::Compound(key) => key.decode(value)
        }
    }
}

fn counter(value: &Value) -> Result<Value, CodecError> {
    match value {
        Value::Null | Value::BigInt(_) => Ok(value.clone()),
        other => Err(unexpected("Counter", "Long", other))
    }
}

/// A fully resolved mapped field.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub(crate) kind:            PropertyKind,
    pub(crate) name:            String,
    pub(crate) column:          String,
    pub(crate) declaring_class: String,
    pub(crate) ty:              TypeRef,
    pub(crate) codec:           PropertyCodec,
    pub(crate) static_column:   bool,
    pub(crate) consistency:     ConsistencyPair,
    pub(crate) ttl:             Option<u32>,
    pub(crate) index:           Option<IndexDescriptor>,
    pub(crate) clustering:      Option<ClusteringDirection>,
    pub(crate) time_uuid:       bool,
    pub(crate) empty_if_null:   bool,
    pub(crate) counter_id:      Option<Arc<PropertyDescriptor>>
}

impl PropertyDescriptor {
    /// Property role.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Logical property (field) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Class declaring the field.
    #[must_use]
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    /// Declared field type.
    #[must_use]
    pub const fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Element type of a list or set property.
    #[must_use]
    pub fn element_type(&self) -> Option<&TypeRef> {
        match (&self.kind, &self.ty) {
            (
                PropertyKind::List | PropertyKind::Set,
                TypeRef::Parameterized {
                    args, ..
                }
            ) => args.last().map(|a| &a.ty),
            _ => None
        }
    }

    /// Key and value types of a map property.
    #[must_use]
    pub fn map_types(&self) -> Option<(&TypeRef, &TypeRef)> {
        match (&self.kind, &self.ty) {
            (
                PropertyKind::Map,
                TypeRef::Parameterized {
                    args, ..
                }
            ) => match args.as_slice() {
                [key, value] => Some((&key.ty, &value.ty)),
                _ => None
            },
            _ => None
        }
    }

    /// The property codec.
    #[must_use]
    pub const fn codec(&self) -> &PropertyCodec {
        &self.codec
    }

    /// Whether the column is static.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.static_column
    }

    /// Read and write consistency.
    #[must_use]
    pub const fn consistency(&self) -> ConsistencyPair {
        self.consistency
    }

    /// Default time-to-live in seconds.
    #[must_use]
    pub const fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    /// Secondary index.
    #[must_use]
    pub const fn index(&self) -> Option<&IndexDescriptor> {
        self.index.as_ref()
    }

    /// Clustering direction of a key component.
    #[must_use]
    pub const fn clustering(&self) -> Option<ClusteringDirection> {
        self.clustering
    }

    /// Whether a UUID column stores time-based UUIDs.
    #[must_use]
    pub const fn is_time_uuid(&self) -> bool {
        self.time_uuid
    }

    /// Whether a missing collection decodes as empty.
    #[must_use]
    pub const fn empty_if_null(&self) -> bool {
        self.empty_if_null
    }

    /// The compound key of an embedded id.
    #[must_use]
    pub fn compound_key(&self) -> Option<&CompoundKeyDescriptor> {
        match &self.codec {
            PropertyCodec::Compound(key) => Some(key),
            _ => None
        }
    }

    /// Identifier of the row, for counter properties.
    #[must_use]
    pub fn counter_id(&self) -> Option<&PropertyDescriptor> {
        self.counter_id.as_deref()
    }

    /// Encode an object-side value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the value does not match the codec.
    pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        self.codec.encode(value)
    }

    /// Decode a store value.
    ///
    /// Collections flagged empty-if-null decode null to an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the value does not match the codec.
    pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        if value.is_null() && self.empty_if_null {
            match self.kind {
                PropertyKind::List => return Ok(Value::List(Vec::new())),
                PropertyKind::Set => return Ok(Value::Set(Vec::new())),
                PropertyKind::Map => return Ok(Value::Map(Vec::new())),
                _ => {}
            }
        }
        self.codec.decode(value)
    }
}

/// Builds [`PropertyDescriptor`]s for one entity.
#[derive(Debug, Clone, Copy)]
pub struct PropertyMetaBuilder<'a> {
    resolver:    CodecResolver<'a>,
    naming:      NamingStrategy,
    consistency: ConsistencyPair
}

impl<'a> PropertyMetaBuilder<'a> {
    /// Builder using the entity naming strategy and default consistency.
    #[must_use]
    pub const fn new(
        config: &'a ConfigurationContext,
        naming: NamingStrategy,
        consistency: ConsistencyPair
    ) -> Self {
        Self {
            resolver: CodecResolver::new(config),
            naming,
            consistency
        }
    }

    /// Parse a mapped column, dispatching on the declared type.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] from codec resolution or counter checks.
    pub fn parse_column(&self, field: &FieldDescriptor) -> Result<PropertyDescriptor, MappingError> {
        if field.has(|a| matches!(a, Annotation::Json)) {
            return self.parse_simple_property(field);
        }
        if field.is_counter() {
            return self.parse_counter_property(field);
        }
        match resolve_raw_class(&field.ty)? {
            RawType::List => self.parse_list_property(field),
            RawType::Set => self.parse_set_property(field),
            RawType::Map => self.parse_map_property(field),
            _ => self.parse_simple_property(field)
        }
    }

    /// Parse a scalar property, attaching an index when declared.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] from codec resolution.
    pub fn parse_simple_property(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        let codec = self.resolver.resolve(field, &field.ty, &field.annotations)?;
        let mut property = self.base(field, PropertyKind::Simple, PropertyCodec::Simple(codec));
        property.index = field
            .find(|a| match a {
                Annotation::Index {
                    name
                } => Some(name.clone()),
                _ => None
            })
            .map(|name| IndexDescriptor {
                name:   name.unwrap_or_else(|| format!("{}_idx", property.column)),
                column: property.column.clone()
            });
        Ok(self.parsed(property))
    }

    /// Parse a list property.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the element codec cannot be resolved.
    pub fn parse_list_property(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        let codec = self.resolver.resolve_list(field)?;
        Ok(self.parsed(self.base(field, PropertyKind::List, PropertyCodec::List(codec))))
    }

    /// Parse a set property.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the element codec cannot be resolved.
    pub fn parse_set_property(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        let codec = self.resolver.resolve_set(field)?;
        Ok(self.parsed(self.base(field, PropertyKind::Set, PropertyCodec::Set(codec))))
    }

    /// Parse a map property.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when a key or value codec cannot be
    /// resolved.
    pub fn parse_map_property(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        let codec = self.resolver.resolve_map(field)?;
        Ok(self.parsed(self.base(field, PropertyKind::Map, PropertyCodec::Map(codec))))
    }

    /// Parse a counter property.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidCounter`] for `ANY` consistency and
    /// for a static counter with a custom consistency.
    pub fn parse_counter_property(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        let property = self.base(field, PropertyKind::Counter, PropertyCodec::Counter);
        let invalid = |reason| MappingError::InvalidCounter {
            field: field.name.clone(),
            class: field.declaring_class.clone(),
            reason
        };
        if property.consistency.read == ConsistencyLevel::Any
            || property.consistency.write == ConsistencyLevel::Any
        {
            return Err(invalid("ANY consistency is not supported for counters"));
        }
        if property.static_column && field.consistency().is_some() {
            return Err(invalid("a static counter cannot declare a custom consistency"));
        }
        Ok(self.parsed(property))
    }

    /// Parse a simple primary key.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] for static, collection or counter ids and
    /// from codec resolution.
    pub fn parse_id(&self, field: &FieldDescriptor) -> Result<PropertyDescriptor, MappingError> {
        check_component(field)?;
        if field.is_static() {
            return Err(static_key(field));
        }
        let mut property = self.parse_simple_property(field)?;
        property.kind = PropertyKind::Id;
        property.index = None;
        Ok(property)
    }

    /// Parse a compound primary key.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the key type cannot be constructed,
    /// from key ordering and from component parsing.
    pub fn parse_embedded_id(
        &self,
        field: &FieldDescriptor
    ) -> Result<PropertyDescriptor, MappingError> {
        if field.is_static() {
            return Err(static_key(field));
        }
        let key_class = match field.raw_type() {
            Some(RawType::Object(ObjectType {
                class: Some(describe),
                ..
            })) => describe(),
            _ => {
                return Err(MappingError::NonInstantiableKey {
                    field:    field.name.clone(),
                    class:    field.declaring_class.clone(),
                    key_type: field.ty.type_name()
                });
            }
        };
        if !key_class.instantiable {
            return Err(MappingError::NonInstantiableKey {
                field:    field.name.clone(),
                class:    field.declaring_class.clone(),
                key_type: key_class.name.clone()
            });
        }

        let layout = KeyVocabulary::detect(&key_class)?
            .orderer()
            .order(&key_class, self.naming)?;
        let mut components = Vec::with_capacity(layout.components.len());
        for component in &layout.components {
            if component.field.is_static() {
                return Err(static_key(component.field));
            }
            let mut property = self.parse_simple_property(component.field)?;
            property.index = None;
            if !component.partition_key {
                property.clustering = Some(ClusteringDirection::from_reversed(component.reversed));
            }
            components.push((component.partition_key, property));
        }
        let key = CompoundKeyDescriptor::assemble(
            key_class.name.clone(),
            components,
            layout.clustering_order
        );

        let mut property = self.base(
            field,
            PropertyKind::EmbeddedId,
            PropertyCodec::Compound(Box::new(key))
        );
        if let Some(name) = field.find(|a| match a {
            Annotation::EmbeddedId {
                name: Some(name)
            } => Some(name.clone()),
            _ => None
        }) {
            property.column = name;
        }
        Ok(self.parsed(property))
    }

    fn base(
        &self,
        field: &FieldDescriptor,
        kind: PropertyKind,
        codec: PropertyCodec
    ) -> PropertyDescriptor {
        let (read, write) = field.consistency().unwrap_or((None, None));
        PropertyDescriptor {
            kind,
            name: field.name.clone(),
            column: field.column_name(self.naming),
            declaring_class: field.declaring_class.clone(),
            ty: field.ty.clone(),
            codec,
            static_column: field.is_static(),
            consistency: ConsistencyPair {
                read:  read.unwrap_or(self.consistency.read),
                write: write.unwrap_or(self.consistency.write)
            },
            ttl: field.find(|a| match a {
                Annotation::Ttl(ttl) => Some(*ttl),
                _ => None
            }),
            index: None,
            clustering: None,
            time_uuid: field.has(|a| matches!(a, Annotation::TimeUuid)),
            empty_if_null: kind.is_collection()
                && field.has(|a| matches!(a, Annotation::EmptyCollectionIfNull)),
            counter_id: None
        }
    }

    fn parsed(&self, property: PropertyDescriptor) -> PropertyDescriptor {
        debug!(
            property = %property.name,
            column = %property.column,
            kind = ?property.kind,
            class = %property.declaring_class,
            "parsed property"
        );
        property
    }
}

fn static_key(field: &FieldDescriptor) -> MappingError {
    MappingError::StaticKeyColumn {
        field: field.name.clone(),
        class: field.declaring_class.clone()
    }
}
