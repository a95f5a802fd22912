// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Class descriptor generation shared by `Entity` and `CompoundKey`.
//!
//! ```text
//! ClassDescriptor::new(concat!(module_path!(), "::", "User"))
//!     .with_annotation(...)                 class annotations
//!     .with_field("name", <type ref>, [...]) one per field
//!     .with_parent(<Parent as Mapped>::class_descriptor())
//! ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

use super::parse::{ArgTarget, EntityDef, FieldDef};

/// Fully qualified class name expression.
pub fn class_name(def: &EntityDef) -> TokenStream {
    let ident = &def.ident;
    quote! { concat!(module_path!(), "::", stringify!(#ident)) }
}

/// `ClassDescriptor` expression for `def` with the given class annotations.
pub fn class_descriptor(def: &EntityDef, class_annotations: &[TokenStream]) -> TokenStream {
    let name = class_name(def);
    let fields = def.fields.iter().map(field);
    let parent = def.parent.as_ref().map(|parent| {
        quote! { .with_parent(<#parent as ::cql_entity::Mapped>::class_descriptor()) }
    });
    quote! {
        ::cql_entity::ClassDescriptor::new(#name)
            #(.with_annotation(#class_annotations))*
            #(#fields)*
            #parent
    }
}

fn field(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let ty = type_ref(field);
    let args = field.args.iter().map(|(target, annotation)| {
        let position = match target {
            ArgTarget::Element => quote! { ::cql_entity::ArgPosition::Element },
            ArgTarget::Key => quote! { ::cql_entity::ArgPosition::Key },
            ArgTarget::Value => quote! { ::cql_entity::ArgPosition::Value }
        };
        quote! { .annotate_arg(#position, #annotation) }
    });
    let annotations = &field.annotations;
    quote! {
        .with_field(#name, #ty #(#args)*, [#(#annotations),*])
    }
}

/// Type reference expression of a field.
///
/// Unmapped, transient and JSON fields become opaque object types so that
/// their Rust type needs no `MappedType` impl.
fn type_ref(field: &FieldDef) -> TokenStream {
    let ty = &field.ty;
    let typed = field.is_mapped() || field.is_key_component();
    if !typed || field.is_transient() || field.is_json() {
        return quote! { ::cql_entity::TypeRef::object_of::<#ty>() };
    }
    match byte_vec(strip_option(ty)) {
        Some(ByteVec::Unsigned) => {
            quote! { ::cql_entity::TypeRef::Raw(::cql_entity::RawType::ByteArray) }
        }
        Some(ByteVec::Signed) => {
            quote! { ::cql_entity::TypeRef::Raw(::cql_entity::RawType::BoxedByteArray) }
        }
        None => quote! { <#ty as ::cql_entity::MappedType>::type_ref() }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ByteVec {
    Unsigned,
    Signed
}

fn single_arg(ty: &Type, wrapper: &str) -> Option<Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner.clone()),
        _ => None
    }
}

fn strip_option(ty: &Type) -> Type {
    single_arg(ty, "Option").unwrap_or_else(|| ty.clone())
}

fn byte_vec(ty: Type) -> Option<ByteVec> {
    let Type::Path(element) = single_arg(&ty, "Vec")? else {
        return None;
    };
    if element.path.is_ident("u8") {
        Some(ByteVec::Unsigned)
    } else if element.path.is_ident("i8") {
        Some(ByteVec::Signed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use syn::{Field, parse_quote};

    use super::*;

    fn field_def(field: Field) -> FieldDef {
        FieldDef::from_field(&field).unwrap()
    }

    #[test]
    fn byte_vectors_are_special_cased() {
        assert_eq!(byte_vec(parse_quote!(Vec<u8>)), Some(ByteVec::Unsigned));
        assert_eq!(byte_vec(parse_quote!(Vec<i8>)), Some(ByteVec::Signed));
        assert_eq!(byte_vec(strip_option(&parse_quote!(Option<Vec<u8>>))), Some(ByteVec::Unsigned));
        assert_eq!(byte_vec(parse_quote!(Vec<String>)), None);
    }

    #[test]
    fn mapped_field_uses_mapped_type() {
        let def = field_def(parse_quote! {
            #[column]
            pub tags: Vec<String>
        });
        let rendered = type_ref(&def).to_string();
        assert!(rendered.contains("MappedType"));
    }

    #[test]
    fn json_and_unmapped_fields_are_opaque() {
        let def = field_def(parse_quote! {
            #[column(json)]
            pub profile: Profile
        });
        assert!(type_ref(&def).to_string().contains("object_of"));

        let def = field_def(parse_quote! {
            pub cache: Cache
        });
        assert!(type_ref(&def).to_string().contains("object_of"));
    }

    #[test]
    fn key_components_are_typed() {
        let def = field_def(parse_quote! {
            #[partition_key(1)]
            pub tenant: String
        });
        assert!(type_ref(&def).to_string().contains("MappedType"));
    }

    #[test]
    fn argument_annotations_are_attached() {
        let def = field_def(parse_quote! {
            #[column]
            #[element(enumerated(ordinal))]
            pub flags: Vec<Status>
        });
        let rendered = field(&def).to_string();
        assert!(rendered.contains("annotate_arg"));
        assert!(rendered.contains("Element"));
        assert!(rendered.contains("Ordinal"));
    }
}
