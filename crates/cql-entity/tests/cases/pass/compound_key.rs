// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cql_entity::{CompoundKey, ConfigurationContext, Entity, EntityMetaBuilder, Mapped};

#[derive(CompoundKey)]
pub struct ReadingKey {
    #[partition_key(1)]
    pub sensor: String,
    #[clustering(1, reversed)]
    pub at: i64,
}

#[derive(Entity)]
#[entity(keyspace = "telemetry", naming = "snake_case")]
pub struct SensorReading {
    #[embedded_id]
    pub key: ReadingKey,
    #[column(static_column)]
    pub location: String,
    #[column]
    pub value: f64,
}

fn main() {
    let config = ConfigurationContext::default();
    let reading = EntityMetaBuilder::new(&config)
        .build(&SensorReading::class_descriptor())
        .unwrap();
    assert_eq!(reading.table(), "sensor_reading");
    assert_eq!(reading.partition_key_columns(), ["sensor"]);
    assert_eq!(reading.clustering_columns(), ["at"]);
}
