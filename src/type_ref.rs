//! Normalized type descriptors for input object fields.
//!
//! A field's declared type may wrap a named leaf in any combination of
//! list and non-null markers (`[Tag!]!`, `String`, `[Profile]`). The
//! resolver flattens that shape into a [`TypeRef`] the rest of the
//! compiler can consult without re-walking the AST.

use async_graphql_parser::types::{BaseType, Type};
use serde::{Deserialize, Serialize};

/// Type names treated as builtin scalars. Anything else is a "custom"
/// type and a candidate for nested input resolution.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Boolean", "Int", "Float", "Enum"];

/// Flattened view of a field's declared type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Name of the named leaf type.
    pub name: String,
    /// Whether a list wrapper appeared anywhere on the path to the leaf.
    pub is_list: bool,
    /// Whether a non-null wrapper appeared anywhere on the path. Recorded
    /// for callers; the pipeline composer itself never consults it.
    pub is_required: bool,
    /// `true` unless the leaf is one of [`BUILTIN_SCALARS`].
    pub is_custom: bool,
}

/// Derive a [`TypeRef`] from a parsed type reference.
///
/// Pure function of the node: list wrappers set `is_list`, non-null
/// wrappers set `is_required`, and the named leaf supplies `name` with a
/// nullable default.
pub fn resolve_type(ty: &Type) -> TypeRef {
    match &ty.base {
        BaseType::Named(name) => TypeRef {
            name: name.to_string(),
            is_list: false,
            is_required: !ty.nullable,
            is_custom: is_custom_type(name.as_str()),
        },
        BaseType::List(inner) => {
            let mut resolved = resolve_type(inner);
            resolved.is_list = true;
            if !ty.nullable {
                resolved.is_required = true;
            }
            resolved
        }
    }
}

fn is_custom_type(name: &str) -> bool {
    !BUILTIN_SCALARS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql_parser::parse_schema;
    use async_graphql_parser::types::{TypeKind, TypeSystemDefinition};
    use pretty_assertions::assert_eq;

    /// Parse `sdl_type` as the type of a single input field and return it.
    fn field_type(sdl_type: &str) -> Type {
        let sdl = format!("input T {{ f: {sdl_type} }}");
        let doc = parse_schema(&sdl).expect("fixture SDL should parse");
        for definition in doc.definitions {
            if let TypeSystemDefinition::Type(type_def) = definition {
                if let TypeKind::InputObject(input_object) = type_def.node.kind {
                    return input_object.fields[0].node.ty.node.clone();
                }
            }
        }
        panic!("fixture produced no input field");
    }

    fn resolve(sdl_type: &str) -> TypeRef {
        resolve_type(&field_type(sdl_type))
    }

    #[test]
    fn test_plain_scalar() {
        assert_eq!(
            resolve("String"),
            TypeRef {
                name: "String".into(),
                is_list: false,
                is_required: false,
                is_custom: false,
            }
        );
    }

    #[test]
    fn test_required_scalar() {
        let resolved = resolve("Int!");
        assert!(resolved.is_required);
        assert!(!resolved.is_list);
        assert!(!resolved.is_custom);
    }

    #[test]
    fn test_list_of_scalar() {
        let resolved = resolve("[Float]");
        assert_eq!(resolved.name, "Float");
        assert!(resolved.is_list);
        assert!(!resolved.is_required);
    }

    #[test]
    fn test_nonnull_anywhere_marks_required() {
        // Inner and outer non-null both flatten to is_required.
        assert!(resolve("[String!]").is_required);
        assert!(resolve("[String]!").is_required);
        assert!(resolve("[String!]!").is_required);
    }

    #[test]
    fn test_custom_type() {
        let resolved = resolve("Profile");
        assert!(resolved.is_custom);
        assert_eq!(resolved.name, "Profile");
    }

    #[test]
    fn test_list_of_custom() {
        let resolved = resolve("[Tag!]");
        assert!(resolved.is_custom);
        assert!(resolved.is_list);
    }

    #[test]
    fn test_builtin_set_exact() {
        // `Enum` is in the builtin set; `ID` deliberately is not.
        assert!(!resolve("Enum").is_custom);
        assert!(resolve("ID").is_custom);
    }
}
