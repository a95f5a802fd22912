// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use cql_entity::{Counter, Entity, Mapped, MappedEnum, ScalarCodec};

#[derive(Debug, Clone, Copy, MappedEnum)]
pub enum Kind {
    Alpha,
    Beta,
}

#[derive(Entity)]
#[entity(
    keyspace = "demo",
    naming = "case_sensitive",
    insert = "all_fields",
    schema_update = true,
    consistency(read = "one", write = "local_quorum")
)]
pub struct Everything {
    #[id(name = "pk")]
    pub id: String,

    #[column(index = "by_label", ttl = 60, empty_if_null)]
    pub label: Vec<String>,

    #[column]
    #[enumerated(ordinal)]
    pub kind: Kind,

    #[column]
    #[key(enumerated(name))]
    #[value(enumerated(ordinal))]
    pub by_kind: HashMap<Kind, Kind>,

    #[column]
    #[type_transformer(key = cql_entity::IdentityCodec)]
    pub plain: HashMap<String, i32>,

    #[column(json)]
    pub raw: Vec<HashMap<String, String>>,

    #[column]
    pub data: Vec<u8>,

    #[column]
    pub signed: Vec<i8>,

    #[column]
    pub tiny: i8,

    #[column]
    #[consistency(read = "quorum")]
    pub note: Option<String>,

    #[counter]
    pub hits: Counter,

    #[transient]
    pub scratch: Option<ScalarCodec>,
}

fn main() {
    let class = Everything::class_descriptor();
    assert_eq!(class.fields.len(), 12);
    assert!(class.name.ends_with("::Everything"));
}
