// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cql_entity::{ConfigurationContext, Entity, EntityRegistry};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(Entity)]
#[entity(table = "users", keyspace = "core")]
pub struct User {
    #[id]
    pub id: Uuid,

    #[column]
    pub name: String,

    #[column(name = "mail")]
    pub email: String,

    #[column]
    pub created_at: DateTime<Utc>,

    #[transient]
    pub password_hash: String,
}

fn main() {
    let registry = EntityRegistry::bootstrap(&ConfigurationContext::default()).unwrap();
    let users = registry.get_for::<User>().unwrap();
    assert_eq!(users.qualified_table(), "core.users");
    assert_eq!(users.property("email").unwrap().column(), "mail");
    assert!(users.property("password_hash").is_none());
}
