// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use cql_entity::{MappedEnum, MappedType, RawType, TypeRef, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, MappedEnum)]
pub enum Priority {
    Low,
    Normal,
    High,
}

fn main() {
    assert_eq!(Priority::VARIANTS, ["Low", "Normal", "High"]);
    assert_eq!(Priority::High.variant_name(), "High");
    assert_eq!(Priority::from_variant_name("Normal"), Some(Priority::Normal));
    assert_eq!(Priority::from_variant_name("Urgent"), None);
    assert_eq!(Value::from(Priority::Low), Value::Enum("Low".to_string()));

    let TypeRef::Raw(RawType::Enum(descriptor)) = Priority::type_ref() else {
        panic!("enum type expected");
    };
    assert_eq!(descriptor.ordinal_of("High"), Some(2));
}
