// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type introspection over [`TypeRef`] and [`ClassDescriptor`].
//!
//! # Operations
//!
//! | Function | Input | Output | Fails on |
//! |----------|-------|--------|----------|
//! | [`infer_element_type`] | `List<T>`, `Set<T>` | `T` (last argument) | raw types |
//! | [`infer_map_key_and_value_types`] | `Map<K, V>` | `(K, V)` | raw types, arity != 2 |
//! | [`resolve_raw_class`] | raw or parameterized | erased type | wildcards, type variables |
//! | [`ancestor_chain`] | class | root-to-leaf classes | never |
//! | [`collect_fields`] | class, predicate | inherited fields | never |

use crate::{
    error::MappingError,
    reflect::{ClassDescriptor, FieldDescriptor},
    types::{RawType, TypeArg, TypeRef}
};

/// Element type of a single-parameter generic, the last type argument.
///
/// # Errors
///
/// Returns [`MappingError::NotParameterized`] when `ty` has no arguments.
pub fn infer_element_type<'a>(
    ty: &'a TypeRef,
    field: &str,
    owner: &str
) -> Result<&'a TypeArg, MappingError> {
    match ty {
        TypeRef::Parameterized {
            args, ..
        } => args.last().ok_or_else(|| not_parameterized(ty, field, owner)),
        _ => Err(not_parameterized(ty, field, owner))
    }
}

/// Key and value types of a map field.
///
/// # Errors
///
/// Returns [`MappingError::NotParameterized`] for raw types and
/// [`MappingError::WrongTypeArity`] unless there are exactly two arguments.
pub fn infer_map_key_and_value_types(
    field: &FieldDescriptor
) -> Result<(&TypeArg, &TypeArg), MappingError> {
    match &field.ty {
        TypeRef::Parameterized {
            args, ..
        } => match args.as_slice() {
            [key, value] => Ok((key, value)),
            other => Err(MappingError::WrongTypeArity {
                field: field.name.clone(),
                class: field.declaring_class.clone(),
                found: other.len()
            })
        },
        ty => Err(not_parameterized(ty, &field.name, &field.declaring_class))
    }
}

/// Erased type of a raw or parameterized type.
///
/// # Errors
///
/// Returns [`MappingError::UnresolvableType`] for wildcards and type
/// variables.
pub fn resolve_raw_class(ty: &TypeRef) -> Result<&RawType, MappingError> {
    match ty {
        TypeRef::Raw(raw)
        | TypeRef::Parameterized {
            raw, ..
        } => Ok(raw),
        TypeRef::Wildcard | TypeRef::Variable(_) => Err(MappingError::UnresolvableType {
            actual: ty.type_name()
        })
    }
}

/// The class and its ancestors, root first.
#[must_use]
pub fn ancestor_chain(class: &ClassDescriptor) -> Vec<&ClassDescriptor> {
    let mut chain = Vec::new();
    let mut current = Some(class);
    while let Some(c) = current {
        chain.push(c);
        current = c.parent.as_deref();
    }
    chain.reverse();
    chain
}

/// Every field declared across the ancestor chain, root to leaf, in
/// declaration order, that satisfies `predicate`.
pub fn collect_fields<'a>(
    class: &'a ClassDescriptor,
    predicate: impl Fn(&FieldDescriptor) -> bool
) -> Vec<&'a FieldDescriptor> {
    ancestor_chain(class)
        .into_iter()
        .flat_map(|c| c.fields.iter())
        .filter(|f| predicate(f))
        .collect()
}

fn not_parameterized(ty: &TypeRef, field: &str, owner: &str) -> MappingError {
    MappingError::NotParameterized {
        field:  field.to_string(),
        class:  owner.to_string(),
        actual: ty.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NativeType;

    fn text() -> TypeRef {
        TypeRef::native(NativeType::Text)
    }

    #[test]
    fn element_type_is_last_argument() {
        let ty = TypeRef::list(text());
        let arg = infer_element_type(&ty, "tags", "app::Post").unwrap();
        assert_eq!(arg.ty, text());
    }

    #[test]
    fn element_type_of_raw_type_fails() {
        let err = infer_element_type(&text(), "tags", "app::Post").unwrap_err();
        assert!(matches!(err, MappingError::NotParameterized { .. }));
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn map_requires_two_arguments() {
        let class = ClassDescriptor::new("app::Post").with_field(
            "attrs",
            TypeRef::Parameterized {
                raw:  RawType::Map,
                args: vec![TypeArg::new(text())]
            },
            []
        );
        let err = infer_map_key_and_value_types(&class.fields[0]).unwrap_err();
        assert_eq!(
            err,
            MappingError::WrongTypeArity {
                field: "attrs".to_string(),
                class: "app::Post".to_string(),
                found: 1
            }
        );
    }

    #[test]
    fn map_key_and_value() {
        let class = ClassDescriptor::new("app::Post").with_field(
            "attrs",
            TypeRef::map(TypeRef::native(NativeType::Int), text()),
            []
        );
        let (key, value) = infer_map_key_and_value_types(&class.fields[0]).unwrap();
        assert_eq!(key.ty, TypeRef::native(NativeType::Int));
        assert_eq!(value.ty, text());
    }

    #[test]
    fn raw_class_of_parameterized_type_is_erasure() {
        let ty = TypeRef::set(text());
        assert_eq!(resolve_raw_class(&ty).unwrap(), &RawType::Set);
    }

    #[test]
    fn raw_class_of_wildcard_and_variable_fails() {
        assert!(resolve_raw_class(&TypeRef::Wildcard).is_err());
        let err = resolve_raw_class(&TypeRef::Variable("T".to_string())).unwrap_err();
        assert_eq!(
            err,
            MappingError::UnresolvableType {
                actual: "T".to_string()
            }
        );
    }

    #[test]
    fn fields_are_collected_root_to_leaf() {
        let base = ClassDescriptor::new("app::Base").with_field("id", text(), []);
        let middle = ClassDescriptor::new("app::Middle")
            .with_field("created", text(), [])
            .with_parent(base);
        let leaf = ClassDescriptor::new("app::Leaf")
            .with_field("name", text(), [])
            .with_parent(middle);

        let names: Vec<&str> = collect_fields(&leaf, |_| true)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["id", "created", "name"]);
        assert_eq!(ancestor_chain(&leaf)[0].name, "app::Base");
    }
}
