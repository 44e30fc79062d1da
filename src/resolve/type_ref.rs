use crate::decl::{QualifiedName, TypeName};
use crate::ir::{LeafType, TypeRef};

use super::{names, path};

/// Qualified name of a leaf, independent of where it occurs.
pub fn leaf_type_name(leaf: &LeafType) -> QualifiedName {
    match leaf {
        LeafType::String => names::prelude("String"),
        LeafType::Int => names::prelude("Int"),
        LeafType::Float => names::prelude("Float"),
        LeafType::Boolean => names::prelude("Boolean"),
        LeafType::Id => names::prelude("ID"),
        LeafType::Enum { namespace, name } => QualifiedName::new(
            names::sub_namespace(namespace, names::ENUM_NAMESPACE),
            [names::capitalize(name)],
        ),
        LeafType::CustomScalar { mapped_type: Some(mapped), .. } => names::split_qualified(mapped),
        LeafType::CustomScalar { mapped_type: None, .. } => {
            names::prelude(names::UNMAPPED_SCALAR_TYPE)
        }
        LeafType::Model { path } => path::type_name(path),
    }
}

/// The type as it occurs: every nullable/list layer applied, innermost first.
/// Nullability is tracked per layer, so `List<T?>` and `List<T>?` stay distinct.
pub fn resolve(ty: &TypeRef) -> TypeName {
    match ty {
        TypeRef::Named(leaf) => TypeName::class(leaf_type_name(leaf)),
        TypeRef::List(inner) => TypeName::list_of(resolve(inner)),
        TypeRef::Nullable(inner) => resolve(inner).with_nullable(true),
    }
}

/// The leaf with all nullable/list layers removed, forced non-null.
pub fn resolve_raw(ty: &TypeRef) -> TypeName {
    TypeName::class(leaf_type_name(ty.leaf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ModelPath;
    use pretty_assertions::assert_eq;

    fn hero() -> LeafType {
        LeafType::Model {
            path: ModelPath::new("com.example", ["TestQuery", "Data", "Hero"]).unwrap(),
        }
    }

    #[test]
    fn raw_strips_every_layer() {
        let t = TypeRef::named(hero()).list().nullable();
        assert_eq!(
            resolve_raw(&t),
            TypeName::class(QualifiedName::new("com.example", ["TestQuery", "Data", "Hero"]))
        );
        assert!(!resolve_raw(&TypeRef::named(LeafType::Int).nullable()).is_nullable());
    }

    #[test]
    fn wrapping_order_is_preserved() {
        let nullable_list = TypeRef::named(LeafType::String).list().nullable();
        let list_of_nullable = TypeRef::named(LeafType::String).nullable().list();

        assert_eq!(resolve(&nullable_list).to_string(), "List<String>?");
        assert_eq!(resolve(&list_of_nullable).to_string(), "List<String?>");
        assert!(resolve(&nullable_list) != resolve(&list_of_nullable));
    }

    #[test]
    fn nested_lists_track_nullability_per_layer() {
        let t = TypeRef::named(LeafType::Id).nullable().list().list().nullable();
        assert_eq!(resolve(&t).to_string(), "List<List<ID?>>?");
    }

    #[test]
    fn bare_leaf_is_non_null() {
        assert_eq!(
            resolve(&TypeRef::named(LeafType::Boolean)),
            TypeName::Class { name: names::prelude("Boolean"), nullable: false }
        );
    }

    #[test]
    fn leaf_names_per_kind() {
        let e = LeafType::Enum { namespace: "com.example".into(), name: "episode".into() };
        assert_eq!(leaf_type_name(&e).to_string(), "com.example.type.Episode");

        let mapped = LeafType::CustomScalar {
            name: "DateTime".into(),
            mapped_type: Some("java.time.Instant".into()),
        };
        assert_eq!(leaf_type_name(&mapped).to_string(), "java.time.Instant");

        let unmapped = LeafType::CustomScalar { name: "JSON".into(), mapped_type: None };
        assert_eq!(leaf_type_name(&unmapped).to_string(), "Any");
    }
}
