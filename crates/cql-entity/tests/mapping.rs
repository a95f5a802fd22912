// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end mapping of derived entities.
//!
//! Every entity in this binary is valid: the registry bootstrap below parses
//! all of them through link-time discovery.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc
};

use chrono::{DateTime, Utc};
use cql_entity::{
    ClusteringDirection, Codec, CodecError, CodecKind, CompoundKey, ConfigurationContext,
    ConsistencyLevel, Counter, Entity, EntityRegistry, InsertStrategy, MappedEnum, NativeType,
    PropertyCodec, PropertyKind, RawType, ScalarCodec, Value
};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, MappedEnum)]
pub enum Status {
    Draft,
    Published,
    Archived
}

#[derive(Debug, Default)]
pub struct LongToText;

impl Codec for LongToText {
    fn name(&self) -> &str {
        "LongToText"
    }

    fn source_type(&self) -> RawType {
        RawType::Native(NativeType::BigInt)
    }

    fn target_type(&self) -> RawType {
        RawType::Native(NativeType::Text)
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::BigInt(n) => Ok(Value::Text(n.to_string())),
            other => Ok(other.clone())
        }
    }

    fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Text(text) => text.parse().map(Value::BigInt).map_err(|e| {
                CodecError::Custom {
                    codec:   self.name().to_string(),
                    message: format!("{e}")
                }
            }),
            other => Ok(other.clone())
        }
    }
}

#[derive(Debug)]
struct Upper;

impl Codec for Upper {
    fn name(&self) -> &str {
        "Upper"
    }

    fn source_type(&self) -> RawType {
        RawType::Native(NativeType::Text)
    }

    fn target_type(&self) -> RawType {
        RawType::Native(NativeType::Text)
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match value {
            Value::Text(text) => Ok(Value::Text(text.to_uppercase())),
            other => Ok(other.clone())
        }
    }

    fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        Ok(value.clone())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Preferences {
    pub theme: String
}

#[derive(Entity)]
#[entity(keyspace = "app")]
pub struct UserProfile {
    #[id]
    pub id:          i64,
    #[column]
    pub name:        String,
    #[column]
    pub status:      Status,
    #[column]
    #[element(enumerated(ordinal))]
    pub history:     Vec<Status>,
    #[column]
    pub tags:        HashSet<String>,
    #[column]
    pub scores:      BTreeMap<String, i32>,
    #[column(json)]
    pub preferences: Preferences,
    #[column]
    pub avatar:      Option<Vec<u8>>,
    #[transient]
    pub cache:       Option<String>,
    pub scratch:     String
}

#[allow(non_snake_case)]
#[derive(Entity)]
#[entity(
    keyspace = "app",
    naming = "snake_case",
    insert = "not_null_fields",
    consistency(read = "local_quorum", write = "quorum")
)]
pub struct AuditRecord {
    #[id(name = "record_id")]
    pub id:        Uuid,
    #[column(index, ttl = 3600)]
    pub actorName: String,
    #[column]
    #[codec(LongToText)]
    pub version:   i64,
    #[column]
    #[runtime_codec("upper")]
    pub label:     String,
    #[column]
    #[consistency(write = "all")]
    pub createdAt: DateTime<Utc>
}

#[derive(CompoundKey)]
pub struct EventKey {
    #[partition_key(1)]
    pub tenant: String,
    #[partition_key(2)]
    pub bucket: i32,
    #[clustering(1, reversed)]
    #[column(time_uuid)]
    pub at:     Uuid,
    #[clustering(2)]
    pub seq:    i64
}

#[derive(Entity)]
#[entity(keyspace = "events", table = "EventLog", naming = "case_sensitive")]
pub struct Event {
    #[embedded_id]
    pub key:      EventKey,
    #[column(static_column)]
    pub owner:    String,
    #[column]
    pub body:     String,
    #[column]
    #[enumerated(ordinal)]
    pub severity: Status
}

#[derive(CompoundKey)]
pub struct LegacyKey {
    #[order(1, partition_key)]
    pub region: String,
    #[order(2)]
    pub day:    i32
}

#[derive(Entity)]
#[entity(keyspace = "legacy")]
pub struct Visit {
    #[embedded_id]
    pub key:  LegacyKey,
    #[column]
    pub path: String
}

#[derive(Entity)]
#[entity(keyspace = "stats")]
pub struct PageViews {
    #[id]
    pub page:   String,
    #[counter]
    pub views:  Counter,
    #[counter]
    pub clicks: Counter
}

#[derive(CompoundKey)]
pub struct Timestamps {
    #[column]
    pub created: DateTime<Utc>
}

#[derive(Entity)]
#[entity(keyspace = "app")]
pub struct Article {
    #[parent]
    pub base:  Timestamps,
    #[id]
    pub slug:  String,
    #[column]
    pub title: String
}

fn registry() -> EntityRegistry {
    let config = ConfigurationContext::default().with_runtime_codec("upper", Arc::new(Upper));
    EntityRegistry::bootstrap(&config).unwrap()
}

#[test]
fn bootstrap_discovers_every_entity() {
    let registry = registry();
    assert_eq!(registry.len(), 6);
    assert!(registry.get_for::<UserProfile>().is_some());
    assert!(registry.get_for::<PageViews>().is_some());
    assert!(registry.get("mapping::Missing").is_none());
}

#[test]
fn simple_entity_uses_defaults() {
    let registry = registry();
    let profile = registry.get_for::<UserProfile>().unwrap();

    assert_eq!(profile.table(), "userprofile");
    assert_eq!(profile.keyspace(), "app");
    assert_eq!(profile.qualified_table(), "app.userprofile");
    assert_eq!(profile.partition_key_columns(), ["id"]);
    assert!(!profile.is_clustered());
    assert_eq!(profile.consistency().read, ConsistencyLevel::One);
    assert_eq!(profile.insert_strategy(), InsertStrategy::AllFields);

    let id = profile.id();
    assert_eq!(id.kind(), PropertyKind::Id);
    assert_eq!(id.column(), "id");
}

#[test]
fn unmapped_and_transient_fields_are_skipped() {
    let registry = registry();
    let profile = registry.get_for::<UserProfile>().unwrap();
    assert!(profile.property("cache").is_none());
    assert!(profile.property("scratch").is_none());
    assert_eq!(profile.properties().len(), 8);
}

#[test]
fn enum_codecs_follow_encoding() {
    let registry = registry();
    let profile = registry.get_for::<UserProfile>().unwrap();

    let status = profile.property("status").unwrap();
    assert_eq!(
        status.encode(&Status::Published.into()).unwrap(),
        Value::Text("Published".to_string())
    );

    let history = profile.property("history").unwrap();
    assert_eq!(history.kind(), PropertyKind::List);
    let encoded = history
        .encode(&Value::List(vec![Status::Archived.into(), Status::Draft.into()]))
        .unwrap();
    assert_eq!(encoded, Value::List(vec![Value::Int(2), Value::Int(0)]));
    assert_eq!(
        history.decode(&encoded).unwrap(),
        Value::List(vec![Status::Archived.into(), Status::Draft.into()])
    );
}

#[test]
fn collections_get_element_codecs() {
    let registry = registry();
    let profile = registry.get_for::<UserProfile>().unwrap();

    let tags = profile.property("tags").unwrap();
    assert_eq!(tags.kind(), PropertyKind::Set);
    assert!(tags.element_type().is_some());

    let scores = profile.property("scores").unwrap();
    assert_eq!(scores.kind(), PropertyKind::Map);
    assert!(scores.map_types().is_some());
    let encoded = scores
        .encode(&Value::Map(vec![(Value::Text("math".to_string()), Value::Int(5))]))
        .unwrap();
    assert_eq!(
        encoded,
        Value::Map(vec![(Value::Text("math".to_string()), Value::Int(5))])
    );
}

#[test]
fn json_and_blob_columns() {
    let registry = registry();
    let profile = registry.get_for::<UserProfile>().unwrap();

    let preferences = profile.property("preferences").unwrap();
    let PropertyCodec::Simple(codec) = preferences.codec() else {
        panic!("preferences should have a scalar codec");
    };
    assert_eq!(codec.kind(), CodecKind::JsonFallback);
    let document = serde_json::to_value(Preferences {
        theme: "dark".to_string()
    })
    .unwrap();
    let encoded = preferences.encode(&Value::Json(document.clone())).unwrap();
    assert_eq!(encoded, Value::Text(r#"{"theme":"dark"}"#.to_string()));
    assert_eq!(preferences.decode(&encoded).unwrap(), Value::Json(document));

    let avatar = profile.property("avatar").unwrap();
    assert!(matches!(
        avatar.codec(),
        PropertyCodec::Simple(ScalarCodec::ByteArray)
    ));
    assert_eq!(
        avatar.encode(&Value::Bytes(vec![1, 2])).unwrap(),
        Value::Blob(vec![1, 2])
    );
    assert_eq!(avatar.encode(&Value::Null).unwrap(), Value::Null);
}

#[test]
fn class_strategy_and_consistency() {
    let registry = registry();
    let audit = registry.get_for::<AuditRecord>().unwrap();

    assert_eq!(audit.table(), "audit_record");
    assert_eq!(audit.insert_strategy(), InsertStrategy::NotNullFields);
    assert_eq!(audit.consistency().read, ConsistencyLevel::LocalQuorum);
    assert_eq!(audit.consistency().write, ConsistencyLevel::Quorum);

    assert_eq!(audit.id().column(), "record_id");
    assert_eq!(audit.property("actorName").unwrap().column(), "actor_name");

    let created = audit.property("createdAt").unwrap();
    assert_eq!(created.column(), "created_at");
    assert_eq!(created.consistency().read, ConsistencyLevel::LocalQuorum);
    assert_eq!(created.consistency().write, ConsistencyLevel::All);
}

#[test]
fn index_and_ttl() {
    let registry = registry();
    let audit = registry.get_for::<AuditRecord>().unwrap();
    let actor = audit.property("actorName").unwrap();
    assert_eq!(actor.ttl(), Some(3600));
    assert_eq!(actor.index().unwrap().name, "actor_name_idx");
}

#[test]
fn custom_and_runtime_codecs() {
    let registry = registry();
    let audit = registry.get_for::<AuditRecord>().unwrap();

    let version = audit.property("version").unwrap();
    assert_eq!(
        version.encode(&Value::BigInt(42)).unwrap(),
        Value::Text("42".to_string())
    );
    assert_eq!(
        version.decode(&Value::Text("42".to_string())).unwrap(),
        Value::BigInt(42)
    );

    let label = audit.property("label").unwrap();
    assert_eq!(
        label.encode(&Value::Text("ok".to_string())).unwrap(),
        Value::Text("OK".to_string())
    );
}

#[test]
fn compound_key_layout() {
    let registry = registry();
    let event = registry.get_for::<Event>().unwrap();

    assert_eq!(event.table(), "EventLog");
    assert!(event.is_clustered());
    assert_eq!(event.partition_key_columns(), ["tenant", "bucket"]);
    assert_eq!(event.clustering_columns(), ["at", "seq"]);

    let order = event.clustering_order();
    assert_eq!(order.len(), 2);
    assert_eq!(order[0].column, "at");
    assert_eq!(order[0].direction, ClusteringDirection::Desc);
    assert_eq!(order[1].direction, ClusteringDirection::Asc);

    let key = event.compound_key().unwrap();
    assert_eq!(key.partition_components().len(), 2);
    assert!(key.clustering_components()[0].is_time_uuid());
    assert!(event.property("owner").unwrap().is_static());
    assert_eq!(
        event
            .property("severity")
            .unwrap()
            .encode(&Status::Archived.into())
            .unwrap(),
        Value::Int(2)
    );
}

#[test]
fn legacy_order_vocabulary() {
    let registry = registry();
    let visit = registry.get_for::<Visit>().unwrap();
    assert_eq!(visit.partition_key_columns(), ["region"]);
    assert_eq!(visit.clustering_columns(), ["day"]);
}

#[test]
fn counter_table() {
    let registry = registry();
    let views = registry.get_for::<PageViews>().unwrap();

    assert!(views.is_counter_table());
    assert_eq!(views.counters().count(), 2);
    for counter in views.counters() {
        assert_eq!(counter.kind(), PropertyKind::Counter);
        assert_eq!(counter.counter_id().unwrap().column(), "page");
    }
    let clicks = views.property("clicks").unwrap();
    assert_eq!(clicks.encode(&Value::BigInt(3)).unwrap(), Value::BigInt(3));
}

#[test]
fn parent_fields_come_first() {
    let registry = registry();
    let article = registry.get_for::<Article>().unwrap();

    let names: Vec<&str> = article.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["created", "slug", "title"]);
    assert!(article.property("base").is_none());
    assert!(
        article
            .property("created")
            .unwrap()
            .declaring_class()
            .ends_with("Timestamps")
    );
}

#[test]
fn schema_of_clustered_table() {
    let registry = registry();
    let event = registry.get_for::<Event>().unwrap();
    let schema = event.schema();

    assert_eq!((schema.keyspace.as_str(), schema.table.as_str()), ("events", "EventLog"));
    assert_eq!(schema.column("at").unwrap().ty.to_string(), "timeuuid");
    assert!(schema.column("owner").unwrap().static_column);
    assert_eq!(schema.partition_key, ["tenant", "bucket"]);
    assert_eq!(schema.clustering_columns, ["at", "seq"]);
    let order: Vec<(&str, ClusteringDirection)> = schema
        .clustering_order
        .iter()
        .map(|o| (o.column.as_str(), o.direction))
        .collect();
    assert_eq!(order, [
        ("at", ClusteringDirection::Desc),
        ("seq", ClusteringDirection::Asc)
    ]);
}

#[test]
fn schema_of_simple_table() {
    let registry = registry();
    let audit = registry.get_for::<AuditRecord>().unwrap();
    let schema = audit.schema();

    assert_eq!(schema.column("version").unwrap().ty.to_string(), "text");
    assert_eq!(schema.indexes.len(), 1);
    assert_eq!(schema.indexes[0].name, "actor_name_idx");

    let profile = registry.get_for::<UserProfile>().unwrap();
    let schema = profile.schema();
    assert_eq!(schema.column("history").unwrap().ty.to_string(), "list<int>");
    assert_eq!(schema.column("scores").unwrap().ty.to_string(), "map<text, int>");
    assert_eq!(schema.partition_key, ["id"]);
    assert!(schema.clustering_columns.is_empty());
}
